use env_logger::Env;
use std::env;
use std::path::PathBuf;
use vscode_auto_continue::{AppConfig, AutoContinue, config};

struct Args {
    once: bool,
    interval: Option<u64>,
    debug: bool,
    config_path: PathBuf,
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();

    let mut once = false;
    let mut interval: Option<u64> = None;
    let mut debug = false;
    let mut config_path = PathBuf::from(config::DEFAULT_CONFIG_PATH);

    for arg in args.iter().skip(1) {
        if arg == "--help" || arg == "-h" {
            print_help();
            return None;
        } else if arg == "--version" || arg == "-v" {
            println!("vscode-auto-continue v{}", env!("CARGO_PKG_VERSION"));
            return None;
        } else if arg == "--once" {
            once = true;
        } else if arg == "--debug" {
            debug = true;
        } else if let Some(val) = arg.strip_prefix("--interval=") {
            match val.parse::<u64>() {
                Ok(secs) => interval = Some(secs),
                Err(_) => {
                    eprintln!("❌ Invalid interval value: {val}");
                    return None;
                }
            }
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config_path = PathBuf::from(path);
        } else {
            eprintln!("❌ Unknown argument: {arg}");
            print_help();
            return None;
        }
    }

    Some(Args {
        once,
        interval,
        debug,
        config_path,
    })
}

fn print_help() {
    println!("🤖 VSCode LINGMA auto continue button clicker");
    println!();
    println!("USAGE:");
    println!("    vscode-auto-continue [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)          Run continuously with the configured interval");
    println!("    --once              Execute detection and click only once");
    println!("    --interval=N        Detection interval in seconds (default from config)");
    println!("    --debug             Save screenshots with marked positions");
    println!("    --config=PATH       Config file path (default: config.json)");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    vscode-auto-continue --once");
    println!("    vscode-auto-continue --interval=30");
    println!("    vscode-auto-continue --debug --config=/etc/auto-continue.json");
}

fn main() {
    let Some(args) = parse_args() else {
        return;
    };

    let mut config = match AppConfig::load(&args.config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️ {e}, using default configuration");
            AppConfig::default()
        }
    };
    config.debug_mode |= args.debug;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async move {
        let mut auto_continue = AutoContinue::new(config);
        if args.once {
            log::debug!("Running in 'once' mode");
            auto_continue.run_once().await;
        } else {
            log::debug!("Running in continuous mode");
            auto_continue.run_continuously(args.interval).await;
        }
    });
}
