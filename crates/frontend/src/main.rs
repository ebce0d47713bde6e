mod app;
mod layout;
mod pages;

use app::App;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Pretty;
use tracing_subscriber::prelude::*;
use tracing_web::{MakeWebConsoleWriter, performance_layer};

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();
    yew::Renderer::<App>::new().render();
}

/// Route `tracing` output to the browser console
fn init_tracing() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(level))
        .with(perf_layer)
        .init();
}
