use anyhow::Context;
use globelet::{
    data::launch::{load_launches, parse_launches},
    prelude::*,
};

const BUNDLED_LAUNCHES: &str = include_str!("../data/launches.json");

/// Frame interval of the simulated host loop
const FRAME: Duration = Duration::from_millis(50);

/// Headless globe: spins a simulated camera and logs marker visibility
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let surface = SurfaceConfig::from_env().context("resolving map surface credentials")?;
    log::info!("surface style {} ({:?})", surface.style_url, surface.access_token);

    let launches = match std::env::args().nth(1) {
        Some(path) => load_launches(&path).with_context(|| format!("loading launches from {path}"))?,
        None => parse_launches(BUNDLED_LAUNCHES).context("parsing bundled launches")?,
    };

    let mut markers = MarkerSet::new();
    markers.rebuild(&launches)?;

    let mut camera = HeadlessCamera::from_config(&surface);
    let (mut engine, diagnostics) = GlobeEngine::new(EngineProfile::Default.resolve())?
        .diagnostics_channel();
    engine.attach(&mut camera, markers.markers_mut())?;
    camera.load();

    let mut frames = tokio::time::interval(FRAME);
    let mut report = tokio::time::interval(Duration::from_secs(5));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                camera.advance(FRAME);
                engine.pump(&mut camera, markers.markers_mut());
                for diagnostic in diagnostics.try_iter() {
                    log::debug!("diagnostic: {diagnostic:?}");
                }
            }
            _ = report.tick() => {
                let center = camera.center();
                log::info!(
                    "center ({:.2}, {:.2}) zoom {:.1}; visible: {}",
                    center.lat,
                    center.lng,
                    camera.zoom(),
                    markers.interactive_ids().join(", ")
                );
            }
            result = &mut shutdown => {
                result.context("waiting for ctrl-c")?;
                break;
            }
        }
    }

    engine.detach(&mut camera);
    log::info!("stopped after {} spin transitions", camera.issued().len());
    Ok(())
}
