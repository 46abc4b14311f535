//! `brick config init`

use crate::cli::ConfigInitArgs;
use anyhow::Context;
use std::path::Path;

/// Annotated starter configuration shipped with the binary.
pub const STARTER_CONFIG: &str = include_str!("../../brick.example.toml");

/// Write the starter configuration and return a summary for the terminal.
pub fn handle_config_init(args: &ConfigInitArgs) -> anyhow::Result<String> {
    let target = args.output.as_path();
    if target.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            target.display()
        );
    }
    ensure_parent(target)?;
    std::fs::write(target, STARTER_CONFIG)
        .with_context(|| format!("writing {}", target.display()))?;

    Ok(format!(
        "Wrote {}\nFill in [primary] url and token to use the dialogue service; \
         without them every turn is answered by the fallback.",
        target.display()
    ))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display())),
        _ => Ok(()),
    }
}
