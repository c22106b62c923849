//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# NexusAI console configuration
# Only override what you want to change -- missing fields use defaults.

[api]
# base_url = "https://api.nexusai.com"   # or set NEXUS_API_URL
# timeout_secs = 60                       # 1-600, per request
# connect_timeout_secs = 10               # 1-timeout_secs
# api_key = ""                            # prefer NEXUS_API_KEY

[chat]
# mode = "chat"             # chat, code, reasoning, search_rag, multi_model, fast, creative
# concurrency = "reject"    # reject | queue: a second turn while one is in flight
# duplicate_window_secs = 0 # 0-3600; 0 allows repeating the last prompt

[logging]
# level = "nexus=info"      # tracing EnvFilter directive
"##
}
