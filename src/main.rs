use dioxus::logger::tracing::Level;

use table_explorer::app::App;
use table_explorer::default_webview_data_dir;

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialize logger: {err}");
    }

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title("Table Explorer"),
                )
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}
