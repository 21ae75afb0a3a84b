use corral_cli::{ExitStatus, corral_main};

fn main() -> ExitStatus {
    corral_main()
}
