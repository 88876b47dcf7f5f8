use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipe text file
    #[arg(short, long)]
    pub recipe_file: String,

    /// Optional pantry inventory CSV; stocked staples are left off the list
    #[arg(short, long)]
    pub pantry_file: Option<String>,

    /// Print the generated grocery list as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
