fn main() {
    relnotes::app::cli::run();
}
