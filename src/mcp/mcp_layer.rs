// MCP layer - tool schemas, reply shaping and the stdio server handler.

#[path = "tools/tool_params.rs"]
pub mod params;

#[path = "tools/tool_replies.rs"]
pub mod replies;

#[path = "tools/sheets_tools.rs"]
pub mod server;

pub use server::SheetsToolServer;
