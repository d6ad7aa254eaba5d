use anyhow::Result;
use spatq_core::config::QuantizeConfig;

/// Print a full default QuantizeConfig as TOML to stdout.
pub fn run() -> Result<()> {
    let config = QuantizeConfig::default();
    let toml_str = toml::to_string_pretty(&config)?;
    print!("{}", toml_str);
    Ok(())
}
