fn main() {
    std::process::exit(plughost::app::startup::startup());
}
