//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Blurkit Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "BlurkitTool"
# width = 1400           # 320-7680
# height = 900           # 240-4320
# devtools = false
# user_agent = "Blurkit/0.1"

[worker]
# The worker always serves http://127.0.0.1:5000 and runs with --no-browser.
# name = "BlurkitTool"   # executable base name, platform suffix is added
# hide_console = true    # Windows only

[readiness]
# timeout_ms = 15000     # 500-120000
# interval_ms = 250      # 50-5000
# request_timeout_ms = 1000  # 50-10000

[shutdown]
# reap_timeout_ms = 2000 # 100-30000

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
# worker_output = true
"##
    .to_string()
}
