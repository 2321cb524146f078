use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Backend Args ---
    /// Base URL of the chat backend server (e.g., http://127.0.0.1:5000)
    #[arg(long, env = "CHAT_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    pub server_url: String,

    /// Path prefix under which the intro, chat, reset and history endpoints live.
    #[arg(long, env = "CHAT_API_PREFIX", default_value = "/api")]
    pub api_prefix: String,

    /// Probe the backend health endpoint before loading the intro.
    #[arg(long, env = "CHAT_CHECK_HEALTH", default_value = "false")]
    pub check_health: bool,

    // --- Display Args ---
    /// chrono format string used for message timestamps.
    #[arg(long, env = "CHAT_TIME_FORMAT", default_value = "%H:%M")]
    pub time_format: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
