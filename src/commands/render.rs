use anyhow::{Context, Result};
use colored::Colorize;
use homepro::{
    config::Config,
    image_utils,
    render::{ImageData, Renderer},
};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::RenderArgs;

/// Execute the render command
pub async fn execute(cfg: &Config, args: &RenderArgs) -> Result<()> {
    let original = read_image(&args.original)?;
    let reference = args.reference.as_deref().map(read_image).transpose()?;
    let render_config = args.to_render_config();

    println!(
        "{} {} variation(s) with {}...",
        "Rendering".yellow(),
        render_config.image_count,
        render_config.model
    );

    let renderer = Renderer::new(reqwest::Client::new(), cfg);
    let images = renderer
        .render(&original, reference.as_ref(), &render_config)
        .await?;

    if images.is_empty() {
        println!("{}", "The model returned no images".red());
        return Ok(());
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    for (idx, data_url) in images.iter().enumerate() {
        let path = write_image(&args.out_dir, idx + 1, data_url)?;
        println!("  {} {}", "✓".green(), path.display());
    }

    info!(count = images.len(), out_dir = %args.out_dir.display(), "Render saved");
    Ok(())
}

fn read_image(path: &Path) -> Result<ImageData> {
    let mime_type = image_utils::mime_from_extension(path)
        .with_context(|| format!("Cannot tell image type of {}", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(image_utils::encode_image(&bytes, mime_type)?)
}

fn write_image(out_dir: &Path, index: usize, data_url: &str) -> Result<PathBuf> {
    let (mime_type, bytes) = image_utils::decode_data_url(data_url)?;
    let ext = match mime_type.as_str() {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };

    let path = out_dir.join(format!("render-{}.{}", index, ext));
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_image_picks_extension() {
        let dir = std::env::temp_dir().join(format!("homepro-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = write_image(&dir, 2, "data:image/jpeg;base64,AQID").unwrap();
        assert!(path.ends_with("render-2.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_image_rejects_unknown_extension() {
        assert!(read_image(Path::new("plan.pdf")).is_err());
    }
}
