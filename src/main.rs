use reqlint::arg::arg_parser::ArgParser;
use reqlint::command::command_parser::CommandParser;
use reqlint::command::commands::Command;
use reqlint::core::cli::CliInvocation;
use reqlint::core::context::AppContext;
use reqlint::logging::LogTarget;

fn main() {
    let invocation = match CliInvocation::from_env() {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut ctx =
        match AppContext::new_with_paths(invocation.config_path, invocation.logs_dir) {
            Ok(ctx) => ctx,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        };

    let args = match ArgParser::new().parse(&invocation.args) {
        Ok(args) => args,
        Err(err) => {
            ctx.logger.error(format!("{err}"), LogTarget::ConsoleAndFile);
            std::process::exit(2);
        }
    };

    let command_parser = CommandParser::new();
    let command = match command_parser.parse(&invocation.command, &args) {
        Ok(command) => command,
        Err(err) => {
            ctx.logger.error(format!("{err}"), LogTarget::ConsoleAndFile);
            std::process::exit(2);
        }
    };

    if let Err(err) = command.execute(&mut ctx) {
        ctx.logger.error(format!("{err}"), LogTarget::ConsoleAndFile);
        std::process::exit(1);
    }
}
