pub const DEFAULT_CONFIG_TOML: &str = r#"[prompt]
user = "subodh"
host = "portfolio"

[theme]
default = "dark"
palette_file = ""

[content]
path = ""

[storage]
state_dir = "~/.portfolio-terminal"

[logging]
level = "info"
"#;
