use dotfield::Simulation;

fn main() {
    env_logger::init();

    if let Err(err) = Simulation::new().run() {
        eprintln!("dotfield: {err}");
        std::process::exit(1);
    }
}
