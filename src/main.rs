//! 权限计算引擎命令行入口

use permission_engine::{
    cli::{self, Command},
    config::AppConfig,
    telemetry, PermissionEngine,
};

fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            println!("{}", cli::help_text());
            std::process::exit(1);
        }
    };

    match command {
        Command::Version => {
            println!("permission-engine {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Help => {
            println!("{}", cli::help_text());
            return Ok(());
        }
        _ => {}
    }

    // 加载 .env 文件（开发环境）
    if let Ok(path) = std::env::var("PERM_ENV") {
        dotenv::from_filename(format!(".env.{}", path)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志与指标
    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    // 3. 加载权限目录
    let engine = PermissionEngine::from_config(&config)?;

    tracing::debug!(
        permissions = engine.catalog().len(),
        custom_catalog = config.catalog.path.is_some(),
        "Permission engine ready"
    );

    // 4. 执行命令
    let output = command.execute(&engine)?;
    println!("{}", serde_json::to_string_pretty(&output.value)?);

    if output.exit_code != 0 {
        std::process::exit(output.exit_code);
    }

    Ok(())
}
