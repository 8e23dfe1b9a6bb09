mod args;
mod compose;

use anyhow::{Context, Result};
use clap::Parser;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::text::layout_line;
use glint_engine::texture::{request_headless_device, WgpuTextureSink};
use glint_engine::{AtlasConfig, FontId, FontSystem, GlyphAtlas, PixelBuffer};

use crate::args::StudioArgs;

fn main() {
    init_logging(LoggingConfig::default());

    let args = StudioArgs::parse();

    if let Err(e) = run(&args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: &StudioArgs) -> Result<()> {
    let bytes = std::fs::read(&args.font)
        .with_context(|| format!("failed to read font {}", args.font.display()))?;

    let mut fonts = FontSystem::new();
    let font = fonts.load_font(&bytes).context("failed to parse font")?;

    // ── CPU atlas ─────────────────────────────────────────────────────────
    let config = AtlasConfig::square(args.atlas);
    let mut atlas = GlyphAtlas::new(config, PixelBuffer::new(config.width, config.height));

    let baseline = (args.size * 1.25).ceil();
    let run = layout_line(&mut atlas, &fonts, font, args.size, &args.text, (4.0, baseline))
        .context("failed to lay out text")?;

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║            GLINT ATLAS STUDIO          ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  glyphs cached   {:>6}                ║", atlas.len());
    println!("  ║  quads emitted   {:>6}                ║", run.quads.len());
    println!("  ║  line advance    {:>9.1} px           ║", run.advance);
    println!("  ║  atlas full      {:>6}                ║", if atlas.is_full() { "YES" } else { "no" });
    println!("  ╚════════════════════════════════════════╝");
    println!();

    if atlas.is_full() {
        log::warn!("atlas overflowed; rerun with a larger --atlas");
    }

    if let Some(first) = run.quads.first() {
        let record = atlas.get_or_create(&fonts, font, args.size, first.ch)?;
        let (x, y) = (
            (record.u0 * config.width as f32).round() as u32,
            (record.v0 * config.height as f32).round() as u32,
        );
        println!("  '{}' ({}×{} px):", first.ch, record.width, record.height);
        print!("{}", compose::ascii_preview(atlas.sink(), x, y, record.width, record.height));
        println!();
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;

    let atlas_path = args.out.join("atlas.png");
    image::save_buffer(
        &atlas_path,
        atlas.sink().as_bytes(),
        config.width,
        config.height,
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("failed to write {}", atlas_path.display()))?;
    log::info!("wrote {}", atlas_path.display());

    let line_w = (run.advance.ceil() as u32 + 8).max(1);
    let line_h = (baseline + args.size * 0.5).ceil() as u32;
    let line = compose::compose_line(&run, atlas.sink(), line_w, line_h);
    let line_path = args.out.join("line.png");
    line.save(&line_path)
        .with_context(|| format!("failed to write {}", line_path.display()))?;
    log::info!("wrote {} ({} lit pixels)", line_path.display(), compose::lit_pixels(&line));

    // ── GPU atlas ─────────────────────────────────────────────────────────
    if args.gpu {
        upload_to_gpu(args, &fonts, font, config)?;
    }

    Ok(())
}

/// Builds the same atlas directly into a wgpu texture.
fn upload_to_gpu(args: &StudioArgs, fonts: &FontSystem, font: FontId, config: AtlasConfig) -> Result<()> {
    let (device, queue) = pollster::block_on(request_headless_device())?;
    let sink = WgpuTextureSink::new(&device, queue.clone(), config.width, config.height);
    let mut atlas = GlyphAtlas::new(config, sink);

    for ch in args.text.chars().filter(|c| !c.is_control()) {
        atlas.get_or_create(fonts, font, args.size, ch)?;
    }

    queue.submit(std::iter::empty());
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("failed waiting for atlas uploads")?;

    log::info!(
        "uploaded {} glyphs into a {}×{} GPU atlas",
        atlas.len(),
        atlas.sink().dimensions().0,
        atlas.sink().dimensions().1,
    );
    Ok(())
}
