use std::path::PathBuf;

use clap::Parser;
use geojson_camera_importer::config::{ConfigOverrides, ImportConfig};
use geojson_camera_importer::error::Result;
use geojson_camera_importer::io::{object_from_json, object_to_json, write_report};
use geojson_camera_importer::{ScenePlan, import_file};

#[derive(Parser)]
#[command(version, about, author)]
struct GjciCli {
    /// path to the OpenDroneMap shots file, usually "<project>-shots.geojson"
    path: PathBuf,

    /// json file with an import config, flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// write the scene plan here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// write a text summary
    #[arg(long)]
    report: Option<PathBuf>,

    /// save a rerun recording of the imported cameras
    #[cfg(feature = "visualization")]
    #[arg(long)]
    rrd: Option<PathBuf>,
}

impl GjciCli {
    fn import_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => object_from_json::<ImportConfig>(path)?,
            None => ImportConfig::default(),
        };
        self.overrides.apply(&mut config);
        Ok(config)
    }
}

fn try_main(cli: &GjciCli) -> Result<()> {
    let config = cli.import_config()?;
    let mut plan = ScenePlan::default();

    #[cfg(feature = "visualization")]
    let summary = match &cli.rrd {
        Some(rrd) => {
            let recording = rerun::RecordingStreamBuilder::new("geojson_camera_import")
                .save(rrd)
                .map_err(|e| geojson_camera_importer::ImportError::Sink(e.to_string()))?;
            let rerun_sink = geojson_camera_importer::visualization::RerunSink::new(recording);
            import_file(
                &cli.path,
                &config,
                geojson_camera_importer::sink::Tee(&mut plan, rerun_sink),
            )?
        }
        None => import_file(&cli.path, &config, &mut plan)?,
    };
    #[cfg(not(feature = "visualization"))]
    let summary = import_file(&cli.path, &config, &mut plan)?;

    match &cli.output {
        Some(output) => object_to_json(output, &plan)?,
        None => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    if let Some(report) = &cli.report {
        write_report(report, &summary)?;
    }
    eprintln!("{summary}");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = GjciCli::parse();
    if let Err(err) = try_main(&cli) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
