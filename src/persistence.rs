//! Provides [`ModelStore`], a directory of models addressed by name.
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Error, Result, WeightedSampleMatrix};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};


const CLASSIFIER_SUFFIX: &str = "classifier.json";
const DISTRIBUTION_SUFFIX: &str = "distribution.json";


/// Stores classifiers and weighted-sample matrices as JSON files
/// under a root directory.
/// The model `name` lives in `<root>/<name>.classifier.json`,
/// its optional distribution in `<root>/<name>.distribution.json`.
///
/// # Example
/// ```no_run
/// use tcboost::prelude::*;
///
/// # fn run(f: &AdaBoostClassifier) -> tcboost::Result<()> {
/// let store = ModelStore::open("models")?;
/// store.write_classifier("reuters", f)?;
/// let g: AdaBoostClassifier = store.read_classifier("reuters")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModelStore {
    root: PathBuf,
}


impl ModelStore {
    /// Open the store at `root`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }


    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }


    /// Path of the classifier of `name`.
    pub fn classifier_path(&self, name: &str) -> Result<PathBuf> {
        self.resource(name, CLASSIFIER_SUFFIX)
    }


    /// Path of the distribution of `name`.
    pub fn distribution_path(&self, name: &str) -> Result<PathBuf> {
        self.resource(name, DISTRIBUTION_SUFFIX)
    }


    /// Write `classifier` under `name`, replacing any previous one.
    pub fn write_classifier<C>(&self, name: &str, classifier: &C) -> Result<()>
        where C: Serialize,
    {
        let path = self.classifier_path(name)?;
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, classifier)?;
        writer.flush()?;
        log::debug!("classifier `{name}` written to {}", path.display());
        Ok(())
    }


    /// Read the classifier stored under `name`.
    pub fn read_classifier<C>(&self, name: &str) -> Result<C>
        where C: DeserializeOwned,
    {
        let path = self.classifier_path(name)?;
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }


    /// Write `matrix` as the distribution of `name`.
    pub fn write_distribution(&self, name: &str, matrix: &WeightedSampleMatrix)
        -> Result<()>
    {
        matrix.save(self.distribution_path(name)?)
    }


    /// Read the distribution of `name`.
    pub fn read_distribution(&self, name: &str) -> Result<WeightedSampleMatrix> {
        WeightedSampleMatrix::load(self.distribution_path(name)?)
    }


    /// Returns `true` if a classifier is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.classifier_path(name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }


    /// Remove every resource of `name`.
    pub fn remove(&self, name: &str) -> Result<()> {
        for path in [self.classifier_path(name)?, self.distribution_path(name)?] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }


    fn resource(&self, name: &str, suffix: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(Error::Config(format!("invalid model name `{name}`")));
        }
        Ok(self.root.join(format!("{name}.{suffix}")))
    }
}
