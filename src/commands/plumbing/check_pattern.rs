use crate::areas::comparison::Comparison;
use crate::areas::pattern::validate_pattern;
use anyhow::bail;
use std::io::Write;

impl Comparison {
    pub async fn check_pattern(&self, pattern: &str) -> anyhow::Result<()> {
        match validate_pattern(pattern, self.settings().pattern_timeout()).await {
            Ok(Some(regex)) => writeln!(self.writer(), "Pattern '{}' is usable", regex.as_str())?,
            Ok(None) => writeln!(self.writer(), "Empty pattern, nothing will be stripped")?,
            Err(e) => bail!("Pattern '{pattern}' rejected: {e}"),
        }

        Ok(())
    }
}
