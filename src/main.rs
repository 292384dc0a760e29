fn main() -> Result<(), Box<dyn std::error::Error>> {
    classchat::cli::main()
}
