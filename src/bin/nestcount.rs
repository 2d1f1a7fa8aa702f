use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let mut input: String = String::new();
	if let Err(err) = std::io::stdin().read_to_string(&mut input) {
		eprintln!("nestcount: {err}");
		return ExitCode::FAILURE;
	}

	match nest_mechanic::cases::run(&input) {
		Ok(output) => {
			print!("{output}");
			ExitCode::SUCCESS
		},
		Err(err) => {
			eprintln!("nestcount: {err}");
			ExitCode::FAILURE
		},
	}
}
