fn main() {
    variadic::cli::run();
}
