use crate::cli::GenerateArgs;
use crate::error::Result;
use icoolgen::workflows::generate::{self, GenerateConfig, GenerateResult, OutputTarget};
use tracing::info;

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = GenerateConfig {
        problem_path: args.input,
        output: if args.stdout {
            OutputTarget::Memory
        } else {
            OutputTarget::Path(args.output)
        },
    };

    info!("Invoking the generate workflow...");
    match generate::run(&config)? {
        GenerateResult::Written { path, commands } => {
            println!(
                "✓ Wrote {} region command(s) to: {}",
                commands,
                path.display()
            );
        }
        GenerateResult::Rendered { text, .. } => {
            print!("{}", text);
        }
    }
    Ok(())
}
