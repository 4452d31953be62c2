use std::path::PathBuf;

/// Generate wallpapers with the Pollinations image API
#[derive(Debug, clap::Parser)]
#[command(name = "wallai", version)]
pub struct Cli {
    /// Prompt text
    #[arg(short, long, default_value_t)]
    pub prompt: String,

    /// Tag to append to the prompt
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Visual style
    #[arg(short, long)]
    pub style: Option<String>,

    /// Mood descriptor
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Negative prompt
    #[arg(short, long)]
    pub negative: Option<String>,

    /// Image model [default: flux]
    #[arg(short = 'i', long, visible_alias = "im")]
    pub model: Option<String>,

    /// Pick a random model
    #[arg(short, long)]
    pub random_model: bool,

    /// Seed for random model selection [default: current unix time]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of images
    #[arg(short = 'x', long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Output directory [default: ~/pictures/generated-wallpapers]
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Set the wallpaper with termux-wallpaper [default: true]
    #[arg(short = 'w', long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub set_wallpaper: Option<bool>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Defaults file [default: <config dir>/wallai.ron]
    #[arg(long)]
    pub config: Option<PathBuf>,
}
