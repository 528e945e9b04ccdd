use std::net::SocketAddr;

use tokio::net::TcpListener;

use campus_chat_backend::config::Config;
use campus_chat_backend::handler::{router, AppState};

const BANNER: &str = r#"
 ██████╗ █████╗ ███╗   ███╗██████╗ ██╗   ██╗███████╗██████╗  ██████╗ ████████╗
██╔════╝██╔══██╗████╗ ████║██╔══██╗██║   ██║██╔════╝██╔══██╗██╔═══██╗╚══██╔══╝
██║     ███████║██╔████╔██║██████╔╝██║   ██║███████╗██████╔╝██║   ██║   ██║
██║     ██╔══██║██║╚██╔╝██║██╔═══╝ ██║   ██║╚════██║██╔══██╗██║   ██║   ██║
╚██████╗██║  ██║██║ ╚═╝ ██║██║     ╚██████╔╝███████║██████╔╝╚██████╔╝   ██║
 ╚═════╝╚═╝  ╚═╝╚═╝     ╚═╝╚═╝      ╚═════╝ ╚══════╝╚═════╝  ╚═════╝    ╚═╝

              [Campus Chat Widget Backend v1.0]
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    print!("\x1b[2J\x1b[1;1H");
    println!("{}", BANNER);
    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");

    let config = Config::from_env();

    let gemini_status = if config.api_key.is_some() {
        "\x1b[32m✅ READY\x1b[0m"
    } else {
        "\x1b[31m❌ MISSING\x1b[0m"
    };
    let knowledge_status = if config.knowledge_path.is_file() {
        "\x1b[32m✅ FOUND\x1b[0m"
    } else {
        "\x1b[31m❌ MISSING\x1b[0m"
    };

    println!(" 🔧 \x1b[1mSYSTEM CHECK\x1b[0m");
    println!("    ├─ 🧠 Gemini key   : {}", gemini_status);
    println!("    ├─ 🎯 Model        : {}", config.model);
    match config.version_override {
        Some(version) => println!("    ├─ 🔢 API version  : {} (forced)", version),
        None => println!("    ├─ 🔢 API version  : auto"),
    }
    println!(
        "    └─ 📚 Knowledge    : {} ({})",
        knowledge_status,
        config.knowledge_path.display()
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        config,
        http: reqwest::Client::new(),
    };
    let app = router(state);

    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");
    println!(" 🚀 \x1b[1;32mCAMPUSBOT IS ONLINE!\x1b[0m");
    println!("    📡 Listening on   : \x1b[36mhttp://{}\x1b[0m", addr);
    println!("    📍 Chat endpoint  : \x1b[36mPOST http://localhost:{}/chat\x1b[0m", addr.port());
    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");
    println!("\nWaiting for incoming messages...\n");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
