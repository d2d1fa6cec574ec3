
use crate::error::LsaError;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_DIMENSION: usize = 2;
const DEFAULT_TOP: usize = 5;


#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Build the vocabulary, decompose and save the model
    Train,
    /// Load a saved model and rank new documents against the trained ones
    Infer,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Train => write!(f, "train"),
            Mode::Infer => write!(f, "infer"),
        }
    }
}


/// Latent semantic analysis. One line of the documents file is one document.
#[derive(Parser, Debug)]
#[command(name = "lsa_trainer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// train or infer
    #[arg(value_enum)]
    pub mode: Mode,

    /// The file of input documents for training or inference
    pub documents: PathBuf,

    /// The directory of the model (default current dir)
    #[arg(short, long)]
    pub model_dir: Option<PathBuf>,

    /// The directory of other outputs (default current dir)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// The stopwords file, each line holds one word
    #[arg(short, long)]
    pub stopwords: Option<PathBuf>,

    /// The dimension to reduce to (default 2)
    #[arg(short, long)]
    pub dimension: Option<usize>,

    /// Number of most similar trained documents reported per document (default 5)
    #[arg(short, long)]
    pub top: Option<usize>,

    /// JSON file with default values for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}


// keys accepted in the json config file, every one of them is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonParams {
    model_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    stopwords: Option<PathBuf>,
    dimension: Option<usize>,
    top: Option<usize>,
}


#[derive(Clone, Debug)]
pub struct Params {
    pub mode: Mode,
    pub documents: PathBuf,
    pub model_dir: PathBuf,
    pub output_dir: PathBuf,
    pub stopwords: Option<PathBuf>,
    pub dimension: usize,
    pub top: usize,
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using params:
        mode: {}
        documents: {}
        model_dir: {}
        output_dir: {}
        stopwords: {:?}
        dimension: {}
        top: {}",
        self.mode, self.documents.display(), self.model_dir.display(), self.output_dir.display(),
        self.stopwords, self.dimension, self.top)
    }
}


pub struct Config {
    params: Params
}

impl Config {

    pub fn get_params(&self) -> Params {
        self.params.clone()
    }

    fn read_json(path: &Path) -> Result<JsonParams, LsaError> {
        let f = BufReader::new(File::open(path)?);
        serde_json::from_reader(f)
        .map_err(|e| LsaError::Config(format!("cannot read {}: {}", path.display(), e)))
    }

    /// Merges command line options over the optional json file, then over the defaults.
    pub fn new(cli: Cli) -> Result<Config, LsaError> {

        let json = match &cli.config {
            Some(path) => Config::read_json(path)?,
            None => JsonParams::default()
        };

        let top = cli.top.or(json.top).unwrap_or(DEFAULT_TOP);
        if top == 0 {
            return Err(LsaError::Config("top must be at least 1".to_string()));
        }

        let params = Params {
            mode: cli.mode,
            documents: cli.documents,
            model_dir: cli.model_dir.or(json.model_dir).unwrap_or_else(|| PathBuf::from(".")),
            output_dir: cli.output_dir.or(json.output_dir).unwrap_or_else(|| PathBuf::from(".")),
            stopwords: cli.stopwords.or(json.stopwords),
            dimension: cli.dimension.or(json.dimension).unwrap_or(DEFAULT_DIMENSION),
            top,
        };

        Ok(Self {
            params
        })
    }

}


pub mod files_handling {

    use crate::error::LsaError;
    use crate::vocab::normalize;

    use ndarray::Array2;
    use ndarray_npy::{read_npy, write_npy};
    use std::collections::HashSet;
    use std::fs::{self, File};
    use std::io::{BufRead, BufReader, BufWriter, Write};
    use std::path::Path;

    pub fn read_input<R: ReadFile>(file_path: &Path) -> Result<R, LsaError> {
        R::read_file(file_path)
    }

    pub fn save_output<S: SaveFile>(output_dir: &Path, file_name: &str, item: &S) -> Result<(), LsaError> {

        // create output folder
        fs::create_dir_all(output_dir)?;

        // SaveFile can be Array2<f64> or Vec<String>
        item.save_file(&output_dir.join(file_name))
    }

    pub trait ReadFile: Sized {
        fn read_file(file_path: &Path) -> Result<Self, LsaError>;
    }

    pub trait SaveFile {
        fn save_file(&self, file_path: &Path) -> Result<(), LsaError>;
    }

    impl ReadFile for Array2<f64> {
        fn read_file(file_path: &Path) -> Result<Self, LsaError> {
            Ok(read_npy(file_path)?)
        }
    }

    impl SaveFile for Array2<f64> {
        fn save_file(&self, file_path: &Path) -> Result<(), LsaError> {
            write_npy(file_path, self)?;
            Ok(())
        }
    }

    // one item per line, utf-8
    impl ReadFile for Vec<String> {
        fn read_file(file_path: &Path) -> Result<Self, LsaError> {
            let f = BufReader::new(File::open(file_path)?);
            let lines = f.lines().collect::<Result<Vec<String>, _>>()?;
            Ok(lines)
        }
    }

    impl SaveFile for Vec<String> {
        fn save_file(&self, file_path: &Path) -> Result<(), LsaError> {
            let mut f = BufWriter::new(File::create(file_path)?);
            for line in self {
                writeln!(f, "{}", line)?;
            }
            f.flush()?;
            Ok(())
        }
    }

    // stopwords are lower cased and trimmed, blank lines are skipped
    impl ReadFile for HashSet<String> {
        fn read_file(file_path: &Path) -> Result<Self, LsaError> {
            let lines: Vec<String> = read_input(file_path)?;
            Ok(lines
                .iter()
                .map(|line| normalize(line))
                .filter(|word| !word.is_empty())
                .collect())
        }
    }

}
