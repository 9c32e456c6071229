//! `datebot config`: print the effective configuration.

use std::path::Path;

use anyhow::Result;
use console::style;

use datebot_infra::config::{TOKEN_VAR, load_config, load_token};
use datebot_types::config::BotConfig;

pub async fn show_config(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path).await?;
    let token_set = load_token(|key| std::env::var(key).ok()).is_ok();

    if json {
        println!("{}", serde_json::to_string_pretty(&config_json(config_path, &config, token_set))?);
        return Ok(());
    }

    let or_unset = |value: Option<String>| {
        value.map_or_else(|| style("unset".to_string()).dim().to_string(), |v| style(v).cyan().to_string())
    };

    println!();
    println!("  {} datebot v{}", style("📅").bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  Config file:      {}", style(config_path.display()).dim());
    println!(
        "  {TOKEN_VAR}:    {}",
        if token_set {
            style("******** (set)").green().to_string()
        } else {
            style("missing").red().to_string()
        }
    );
    println!("  Channel:          {}", or_unset(config.channel_id.map(|id| id.to_string())));
    println!("  Role:             {}", or_unset(config.role_id.map(|id| id.to_string())));
    println!("  Time zone:        {}", style(&config.time_zone).cyan());
    println!("  Nudge delay:      {}s", config.nudge_delay_secs);
    println!("  Session TTL:      {}s", config.session_ttl_secs);
    println!("  Max sessions:     {}", config.max_sessions);
    println!("  Sweep interval:   {}s", config.sweep_interval_secs);
    println!();

    Ok(())
}

fn config_json(config_path: &Path, config: &BotConfig, token_set: bool) -> serde_json::Value {
    serde_json::json!({
        "config_path": config_path.display().to_string(),
        "token": if token_set { "set" } else { "missing" },
        "config": config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use datebot_types::ids::ChannelId;

    #[test]
    fn json_never_contains_token_value() {
        let config = BotConfig {
            channel_id: Some(ChannelId(42)),
            ..BotConfig::default()
        };
        let value = config_json(Path::new("/etc/datebot.toml"), &config, true);

        assert_eq!(value["token"], "set");
        assert_eq!(value["config"]["channel_id"], 42);
        assert_eq!(value["config"]["time_zone"], "Europe/Warsaw");
        assert_eq!(value["config_path"], "/etc/datebot.toml");
    }
}
