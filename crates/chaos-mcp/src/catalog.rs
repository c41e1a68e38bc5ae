//! The tool catalog
//!
//! A static table of the 25 remote operations this server proxies,
//! grouped the way the hosted service groups them: capture read,
//! capture write, pages, Resonate read, utility. Constructed once at
//! startup and never mutated. All behavior lives in the schema layer
//! and the dispatcher; this module is data.

use indexmap::IndexMap;
use serde_json::json;

use chaos_protocol::mcp::Tool;

use crate::schema::{FieldSpec, ToolSchema};

/// One catalog entry
#[derive(Debug, Clone)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: ToolSchema,
}

/// Ordered name -> definition table
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: IndexMap<&'static str, ToolDef>,
}

// Shared field shapes; the per-tool bounds and defaults vary.

fn page() -> FieldSpec {
    FieldSpec::integer(Some(1), None, "Page number (default: 1)").with_default(json!(1))
}

fn per_page(max: i64, default: i64, description: &'static str) -> FieldSpec {
    FieldSpec::integer(Some(1), Some(max), description).with_default(json!(default))
}

fn limit(max: i64, default: i64, description: &'static str) -> FieldSpec {
    FieldSpec::integer(Some(1), Some(max), description).with_default(json!(default))
}

fn min_score() -> FieldSpec {
    FieldSpec::number(Some(0.0), Some(1.0), "Minimum similarity score 0-1 (default: 0.5)")
        .with_default(json!(0.5))
}

fn created_after() -> FieldSpec {
    FieldSpec::datetime("Filter thoughts created after this date (ISO 8601)")
}

fn created_before() -> FieldSpec {
    FieldSpec::datetime("Filter thoughts created before this date (ISO 8601)")
}

/// Classification/category filters shared by the thought-listing tools
fn classification_filters(schema: ToolSchema) -> ToolSchema {
    schema
        .field("classification_id", FieldSpec::id("Filter by thought type/classification ID"))
        .field(
            "classification",
            FieldSpec::text(
                "Filter by classification name (e.g., \"task\", \"idea\", \"theory\"). Case-insensitive.",
            ),
        )
        .field("category_id", FieldSpec::id("Filter by category ID"))
        .field(
            "category",
            FieldSpec::text(
                "Filter by category name (e.g., \"Technology\", \"Business\"). Case-insensitive.",
            ),
        )
}

impl Catalog {
    /// Build the full catalog
    pub fn new() -> Self {
        let mut tools = IndexMap::new();
        let mut add = |def: ToolDef| {
            let existing = tools.insert(def.name, def);
            debug_assert!(existing.is_none(), "duplicate tool name in catalog");
        };

        // ---------------------------------------------------------------
        // Capture read tools
        // ---------------------------------------------------------------

        add(ToolDef {
            name: "list_thoughts",
            description: "List your captured thoughts with optional filtering by stream, \
                          classification, category, date range, or text search. Returns \
                          paginated results.",
            schema: classification_filters(
                ToolSchema::new()
                    .field("page", page())
                    .field(
                        "per_page",
                        per_page(100, 50, "Items per page (default: 50, max: 100)"),
                    )
                    .field("stream_id", FieldSpec::id("Filter by stream ID"))
                    .field(
                        "stream",
                        FieldSpec::text("Filter by stream name (case-insensitive)"),
                    ),
            )
            .field("created_after", created_after())
            .field("created_before", created_before())
            .field("search", FieldSpec::text("Search thoughts by content text")),
        });

        add(ToolDef {
            name: "get_thought",
            description: "Get a specific thought by ID with all content blocks, classification, \
                          category, and streams.",
            schema: ToolSchema::new()
                .field("thought_id", FieldSpec::id("The thought ID to retrieve").required()),
        });

        add(ToolDef {
            name: "search_similar",
            description: "Find thoughts semantically similar to a text query using AI \
                          embeddings. Great for finding related ideas and concepts.",
            schema: ToolSchema::new()
                .field("text", FieldSpec::text("Text to find similar thoughts for").required())
                .field(
                    "limit",
                    limit(50, 10, "Maximum number of results (default: 10, max: 50)"),
                )
                .field("min_score", min_score()),
        });

        add(ToolDef {
            name: "search_thoughts",
            description: "Search your thoughts using semantic similarity combined with \
                          structured filters. Finds thoughts that match the meaning of your \
                          query, optionally filtered by stream, category, classification, or \
                          date range.",
            schema: classification_filters(
                ToolSchema::new()
                    .field("text", FieldSpec::text("Text to search for semantically").required())
                    .field("stream_id", FieldSpec::id("Filter by stream ID"))
                    .field(
                        "stream",
                        FieldSpec::text("Filter by stream name (case-insensitive)"),
                    ),
            )
            .field("created_after", created_after())
            .field("created_before", created_before())
            .field("limit", limit(50, 50, "Maximum results (default: 50, max: 50)"))
            .field("min_score", min_score()),
        });

        add(ToolDef {
            name: "list_streams",
            description: "List your streams (collections/folders for organizing thoughts). \
                          Streams can be nested hierarchically.",
            schema: ToolSchema::new()
                .field("page", page())
                .field(
                    "per_page",
                    per_page(100, 50, "Items per page (default: 50, max: 100)"),
                )
                .field(
                    "parent_id",
                    // Free string, not an ID: the literal "null" selects roots
                    FieldSpec::text(
                        "Filter by parent stream ID. Use \"null\" for root-level streams only.",
                    ),
                )
                .field(
                    "include_thought_count",
                    FieldSpec::boolean("Include count of thoughts in each stream")
                        .with_default(json!(false)),
                )
                .field(
                    "search",
                    FieldSpec::text("Search streams by name or description (case-insensitive)"),
                ),
        });

        add(ToolDef {
            name: "get_stream",
            description: "Get a stream by ID with its thoughts and child streams.",
            schema: ToolSchema::new()
                .field("stream_id", FieldSpec::id("The stream ID to retrieve").required())
                .field(
                    "include_thoughts",
                    FieldSpec::boolean("Include thoughts in this stream (default: true)")
                        .with_default(json!(true)),
                )
                .field(
                    "thoughts_page",
                    FieldSpec::integer(Some(1), None, "Page number for thoughts (default: 1)")
                        .with_default(json!(1)),
                )
                .field(
                    "thoughts_per_page",
                    per_page(100, 20, "Thoughts per page (default: 20, max: 100)"),
                ),
        });

        add(ToolDef {
            name: "search_streams",
            description: "Search your streams by name or description. Returns matching streams.",
            schema: ToolSchema::new()
                .field(
                    "query",
                    FieldSpec::text("Search query to match against stream name and description")
                        .required(),
                )
                .field(
                    "limit",
                    limit(100, 20, "Maximum number of results (default: 20, max: 100)"),
                ),
        });

        add(ToolDef {
            name: "get_stats",
            description: "Get summary statistics about your captured thoughts: total count, \
                          breakdown by classification and category, date range, and stream \
                          count.",
            schema: ToolSchema::new(),
        });

        add(ToolDef {
            name: "list_recent_thoughts",
            description: "Quickly get your most recently captured thoughts. A simpler \
                          alternative to list_thoughts when you just want to see recent \
                          activity.",
            schema: ToolSchema::new().field(
                "limit",
                limit(50, 10, "Number of recent thoughts to return (default: 10, max: 50)"),
            ),
        });

        // ---------------------------------------------------------------
        // Capture write tools
        // ---------------------------------------------------------------

        add(ToolDef {
            name: "create_thought",
            description: "Capture a new thought with text, images, and/or links. At least one \
                          content type is required. Thoughts are automatically enriched with AI \
                          classification, categorization, entity extraction, and embeddings in \
                          the background.",
            schema: ToolSchema::new()
                .field(
                    "text",
                    FieldSpec::text(
                        "Text content for the thought (max 3000 characters). If longer, split \
                         into multiple thoughts.",
                    ),
                )
                .field(
                    "image_urls",
                    FieldSpec::string_array(
                        5,
                        "Array of image URLs to attach (max 5). If more, split across multiple \
                         thoughts.",
                    ),
                )
                .field(
                    "link_urls",
                    FieldSpec::string_array(
                        5,
                        "Array of link URLs to attach (max 5). If more, split across multiple \
                         thoughts.",
                    ),
                )
                .field(
                    "stream",
                    FieldSpec::text(
                        "Assign to a stream by name (case-insensitive). The stream must already \
                         exist.",
                    ),
                )
                .field(
                    "stream_id",
                    FieldSpec::id("Assign to a stream by ID. Takes precedence over stream name."),
                ),
        });

        // ---------------------------------------------------------------
        // Page tools
        // ---------------------------------------------------------------

        add(ToolDef {
            name: "list_pages",
            description: "List your generated pages (documents created from thoughts) with \
                          optional filters for status, pinned state, and pagination. Returns \
                          page metadata without full content.",
            schema: ToolSchema::new()
                .field("page", page())
                .field("per_page", per_page(50, 20, "Items per page (default: 20, max: 50)"))
                .field(
                    "status",
                    FieldSpec::one_of(
                        &["generating", "complete", "failed", "updating"],
                        "Filter by page status",
                    ),
                )
                .field("is_pinned", FieldSpec::boolean("Filter by pinned state"))
                .field(
                    "sort_by",
                    FieldSpec::one_of(
                        &["newest", "oldest", "recently_updated"],
                        "Sort order (default: newest)",
                    ),
                ),
        });

        add(ToolDef {
            name: "get_page",
            description: "Get a single page by ID with full content, metadata, and source \
                          thought IDs.",
            schema: ToolSchema::new()
                .field("page_id", FieldSpec::id("The page ID to retrieve").required()),
        });

        add(ToolDef {
            name: "update_page",
            description: "Update a page's title, content, and/or short description directly. \
                          This performs a direct edit without AI regeneration. Provide at least \
                          one of title, content, or short_description.",
            schema: ToolSchema::new()
                .field("page_id", FieldSpec::id("The page ID to update").required())
                .field("title", FieldSpec::text("New title for the page"))
                .field("content", FieldSpec::text("New full markdown content for the page"))
                .field(
                    "short_description",
                    FieldSpec::text(
                        "Short description/summary of the page (max 250 characters)",
                    ),
                ),
        });

        add(ToolDef {
            name: "search_pages",
            description: "Search pages by title keywords or content text. Returns matching \
                          pages with content previews.",
            schema: ToolSchema::new()
                .field(
                    "query",
                    FieldSpec::text(
                        "Search query to match against page titles and content \
                         (case-insensitive)",
                    )
                    .required(),
                )
                .field(
                    "status",
                    FieldSpec::one_of(
                        &["generating", "complete", "failed", "updating"],
                        "Filter by page status (default: complete)",
                    ),
                )
                .field(
                    "limit",
                    limit(25, 10, "Maximum number of results (default: 10, max: 25)"),
                ),
        });

        // ---------------------------------------------------------------
        // Resonate read tools
        // ---------------------------------------------------------------

        add(ToolDef {
            name: "search_posts",
            description: "Search public Resonate posts using semantic similarity. Find posts \
                          about any topic by describing what you are looking for.",
            schema: ToolSchema::new()
                .field("text", FieldSpec::text("Text to search for semantically").required())
                .field("limit", limit(50, 20, "Maximum results (default: 20, max: 50)"))
                .field("min_score", min_score()),
        });

        add(ToolDef {
            name: "list_posts",
            description: "Browse public Resonate posts with filters and sorting. Use this to \
                          find trending, recent, or popular posts.",
            schema: ToolSchema::new()
                .field("page", page())
                .field(
                    "per_page",
                    per_page(100, 25, "Items per page (default: 25, max: 100)"),
                )
                .field(
                    "category",
                    FieldSpec::text(
                        "Filter by category name (e.g., \"Technology\"). Case-insensitive.",
                    ),
                )
                .field("category_id", FieldSpec::id("Filter by category ID"))
                .field(
                    "classification",
                    FieldSpec::text("Filter by classification name. Case-insensitive."),
                )
                .field("classification_id", FieldSpec::id("Filter by classification ID"))
                .field(
                    "sort_by",
                    FieldSpec::one_of(
                        &["newest", "oldest", "most_upvoted", "most_downvoted"],
                        "Sort order (default: newest)",
                    ),
                )
                .field(
                    "created_after",
                    FieldSpec::datetime("Filter posts created after this date (ISO 8601)"),
                )
                .field(
                    "created_before",
                    FieldSpec::datetime("Filter posts created before this date (ISO 8601)"),
                )
                .field(
                    "search",
                    FieldSpec::text(
                        "Text search in post content (case-insensitive substring match)",
                    ),
                ),
        });

        add(ToolDef {
            name: "get_post",
            description: "Get full details for a single Resonate post including votes, \
                          reactions breakdown, topic cluster, and entities.",
            schema: ToolSchema::new()
                .field("post_id", FieldSpec::id("The post ID to retrieve").required()),
        });

        add(ToolDef {
            name: "get_post_demographics",
            description: "Get demographic voting breakdown for a Resonate post. Shows how \
                          different age groups, sexes, regions, and locations voted.",
            schema: ToolSchema::new()
                .field("post_id", FieldSpec::id("The post ID to get demographics for").required())
                .field(
                    "dimension",
                    FieldSpec::one_of(
                        &["age", "sex", "country", "state", "region", "zip"],
                        "Filter to a specific demographic dimension (optional, returns all if \
                         omitted)",
                    ),
                ),
        });

        add(ToolDef {
            name: "get_topic_clusters",
            description: "Get trending and active topic clusters from Resonate. Shows what \
                          topics people are posting and voting about, with heat scores and \
                          sentiment.",
            schema: ToolSchema::new()
                .field(
                    "status",
                    FieldSpec::one_of(
                        &["emerging", "trending", "active", "cooling", "archived"],
                        "Filter by lifecycle status",
                    ),
                )
                .field(
                    "sort_by",
                    FieldSpec::one_of(
                        &["heat_score", "post_count", "newest"],
                        "Sort order (default: heat_score)",
                    ),
                )
                .field("limit", limit(50, 20, "Maximum results (default: 20, max: 50)")),
        });

        add(ToolDef {
            name: "get_my_votes",
            description: "Get your voting history on Resonate posts. Search for posts you \
                          upvoted or downvoted by content text.",
            schema: ToolSchema::new()
                .field("page", page())
                .field(
                    "per_page",
                    per_page(100, 25, "Items per page (default: 25, max: 100)"),
                )
                .field(
                    "vote_type",
                    FieldSpec::one_of(&["upvote", "downvote"], "Filter by vote type"),
                )
                .field(
                    "search",
                    FieldSpec::text("Search post content text (case-insensitive)"),
                )
                .field(
                    "created_after",
                    FieldSpec::datetime("Filter votes created after this date (ISO 8601)"),
                )
                .field(
                    "created_before",
                    FieldSpec::datetime("Filter votes created before this date (ISO 8601)"),
                ),
        });

        add(ToolDef {
            name: "get_my_post_performance",
            description: "Get performance data for posts you published to Resonate. Shows vote \
                          counts, reactions, and demographic breakdowns for your content.",
            schema: ToolSchema::new()
                .field("page", page())
                .field(
                    "per_page",
                    per_page(50, 25, "Items per page (default: 25, max: 50)"),
                )
                .field(
                    "sort_by",
                    FieldSpec::one_of(
                        &["newest", "most_upvoted", "most_downvoted"],
                        "Sort order (default: newest)",
                    ),
                ),
        });

        // ---------------------------------------------------------------
        // Utility tools
        // ---------------------------------------------------------------

        add(ToolDef {
            name: "get_usage",
            description: "Get your API usage statistics including current usage, rate limits, \
                          and when limits reset. Useful for monitoring your API consumption.",
            schema: ToolSchema::new(),
        });

        add(ToolDef {
            name: "get_reactions",
            description: "Get all available reaction types used on Resonate posts. Reactions \
                          are nuanced labels like \"Resonates\", \"Insightful\", \"Fallacious\" \
                          that people attach to their votes.",
            schema: ToolSchema::new().field(
                "vote_type",
                FieldSpec::one_of(
                    &["upvote", "downvote"],
                    "Filter by vote type (upvote reactions or downvote reactions)",
                ),
            ),
        });

        add(ToolDef {
            name: "get_classifications",
            description: "Get all available thought classifications/types (e.g., task, idea, \
                          theory, question). Use this to discover classification names for \
                          filtering thoughts.",
            schema: ToolSchema::new(),
        });

        add(ToolDef {
            name: "get_categories",
            description: "Get all available categories (e.g., Technology, Business, Health). \
                          Use this to discover category names for filtering thoughts.",
            schema: ToolSchema::new(),
        });

        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDef> {
        self.tools.values()
    }

    /// Render every definition for a `tools/list` response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.iter()
            .map(|def| Tool {
                name: def.name.to_string(),
                description: Some(def.description.to_string()),
                input_schema: def.schema.input_schema(),
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
