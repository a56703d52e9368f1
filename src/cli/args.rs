//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// move2jelly - Move or link downloaded videos into a Jellyfin library
#[derive(Parser, Debug)]
#[command(name = "move2jelly")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve incoming videos on TMDB and place them in the library
    Run(RunArgs),

    /// Show how filenames are parsed, without contacting TMDB
    Parse {
        /// File names to parse
        #[arg(value_name = "FILENAME", required = true)]
        filenames: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Directory holding the downloaded videos
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub incoming: PathBuf,

    /// Video extensions to pick up (repeatable; default from config)
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Movies library directory
    #[arg(short, long, value_name = "DIR")]
    pub movies: Option<PathBuf>,

    /// Series library directory
    #[arg(short, long, value_name = "DIR")]
    pub series: Option<PathBuf>,

    /// Hard-link files instead of moving them
    #[arg(short, long)]
    pub link: bool,

    /// Use the episode title from the file name instead of TMDB's
    #[arg(short, long)]
    pub keep_episode_title: bool,

    /// Dry run - show what would be done
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// TMDB response language (e.g. en-US, fr-FR)
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::parse_from([
            "move2jelly", "run", "--incoming", "/dl", "--movies", "/lib/movies", "--series",
            "/lib/tv", "--link", "--dry-run", "--ext", "mkv", "--ext", "mp4",
        ]);

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.incoming, PathBuf::from("/dl"));
        assert_eq!(args.movies, Some(PathBuf::from("/lib/movies")));
        assert!(args.link);
        assert!(args.dry_run);
        assert!(!args.keep_episode_title);
        assert_eq!(args.extensions, vec!["mkv", "mp4"]);
    }

    #[test]
    fn test_parse_command_requires_filename() {
        assert!(Cli::try_parse_from(["move2jelly", "parse"]).is_err());
    }
}
