use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use badgekit::job::{apply_view, DesignSpec};
use badgekit::{designer_options, init_logging, load_config, DesignerState, JobFile, TemplateCatalog};

#[derive(Parser)]
#[command(name = "badgekit", version, about = "Prepare die-cut photo badges for print")]
struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available badge templates
    Templates,

    /// Render a single design to a PNG
    Preview {
        /// Source photo
        #[arg(long)]
        image: PathBuf,
        /// Template key
        #[arg(long, default_value = badgekit::designer::DEFAULT_TEMPLATE_KEY)]
        shape: String,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan_x: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan_y: f64,
        /// Hide the overlay outside the visible area
        #[arg(long)]
        no_mask: bool,
        /// Render the masked print raster instead of the editor view
        #[arg(long)]
        export_mode: bool,
        /// Output PNG path
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Render a job file into a packed PDF
    Export {
        /// Job file (TOML or JSON)
        #[arg(long)]
        job: PathBuf,
        /// Directory for the PDF (defaults to the configured output directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    tracing::debug!("badgekit {}", badgekit::VERSION);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Templates => {
            for template in TemplateCatalog::all() {
                println!("{:<10} {}", template.key, template);
            }
        }
        Command::Preview {
            image,
            shape,
            zoom,
            pan_x,
            pan_y,
            no_mask,
            export_mode,
            output,
        } => {
            let design = DesignSpec {
                image,
                shape,
                zoom,
                pan_x,
                pan_y,
                copies: 1,
            };
            let mut state = DesignerState::new(designer_options(&config))?;
            state
                .open_image(&design.image)
                .with_context(|| format!("Failed to open {}", design.image.display()))?;
            apply_view(&mut state, &design)?;

            if export_mode {
                let png = state.render_export()?;
                std::fs::write(&output, png)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            } else {
                state.set_show_mask(!no_mask)?;
                let preview = state
                    .preview()
                    .context("No preview was rendered")?;
                preview
                    .save(&output)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            }
            tracing::info!("{} | wrote {}", state.viewport(), output.display());
        }
        Command::Export { job, output_dir } => {
            let job_file = JobFile::load(&job)?;
            let document = job_file.run(designer_options(&config))?;

            let dir = output_dir.unwrap_or_else(|| config.export.output_directory.clone());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let path = dir.join(&document.file_name);
            std::fs::write(&path, &document.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
