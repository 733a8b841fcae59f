//! Output helpers shared between commands
use log::*;
use std::path::Path;
use tokio::fs;

use crate::error::Result;

/// Print `content` to stdout, or write it to `out_file` creating parent
/// directories as needed.
pub async fn write_output(content: &str, out_file: Option<&str>) -> Result<()> {
    let Some(out_file) = out_file else {
        println!("{content}");
        return Ok(());
    };

    let file_path = Path::new(out_file);

    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
        && !fs::try_exists(parent).await.unwrap_or(false)
    {
        fs::create_dir_all(parent).await?;
    }

    info!("writing output to: {}", file_path.display());
    fs::write(file_path, content).await?;

    Ok(())
}
