use cmc_drv::DriverError;

fn main() {
    if let Err(e) = cmc_drv::main() {
        eprintln!("error: {}", e);
        let code = e.downcast_ref::<DriverError>().map_or(1, DriverError::exit_code);
        std::process::exit(code);
    }
}
