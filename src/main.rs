use fastapi_typed_routes::cli::run_cli;

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
