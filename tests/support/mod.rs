pub mod config_env;
