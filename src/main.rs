//! ft-log - ft_loggingのコマンドラインフロントエンド

use anyhow::Result;

fn main() -> Result<()> {
    ft_logging::logging::init();
    ft_logging::cli::run()
}
