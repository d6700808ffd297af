/**
 * ReviseWise desktop client - Main Entry Point
 *
 * Loads configuration, installs logging and hands an `AppState` to eframe.
 */
use eframe::egui;
use tracing_subscriber::EnvFilter;
use revisewise::egui_app::theme::styles;
use revisewise::egui_app::{views, AppState, Config, Services};

const DEFAULT_LOG_FILTER: &str = "revisewise=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!(server = config.server_url(), "starting ReviseWise");
    let services = Services::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ReviseWise",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(ReviseWiseApp {
                state: AppState::new(services),
            }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct ReviseWiseApp {
    state: AppState,
}

impl eframe::App for ReviseWiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_alert(ctx, &mut self.state);

        // Background results arrive through channels; keep polling.
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}
