// Usage: crosswalk <translate|show|check|ast|profile> ...

fn main() {
    crosswalk::logging::init_tracing();
    std::process::exit(crosswalk::cli::run());
}
