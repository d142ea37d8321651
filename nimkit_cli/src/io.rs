use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write, stdin, stdout},
};

/// Where to read from: `-` for standard input, file path otherwise
#[derive(Debug, Clone)]
pub enum FileOrStdin {
    FilePath(String),
    Stdin,
}

impl From<String> for FileOrStdin {
    fn from(value: String) -> Self {
        if value == "-" {
            Self::Stdin
        } else {
            Self::FilePath(value)
        }
    }
}

impl Display for FileOrStdin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "-"),
            Self::FilePath(path) => write!(f, "{path}"),
        }
    }
}

impl FileOrStdin {
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        match self {
            Self::FilePath(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            Self::Stdin => Ok(Box::new(stdin().lock())),
        }
    }
}

/// Where to write to: `-` for standard output, file path otherwise
#[derive(Debug, Clone)]
pub enum FileOrStdout {
    FilePath(String),
    Stdout,
}

impl From<String> for FileOrStdout {
    fn from(value: String) -> Self {
        if value == "-" {
            Self::Stdout
        } else {
            Self::FilePath(value)
        }
    }
}

impl Display for FileOrStdout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "-"),
            Self::FilePath(path) => write!(f, "{path}"),
        }
    }
}

impl FileOrStdout {
    pub fn create(&self) -> io::Result<Box<dyn Write>> {
        match self {
            Self::FilePath(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            Self::Stdout => Ok(Box::new(stdout().lock())),
        }
    }
}

/// Write `value` as a single line of JSON
pub fn write_json_line<W, T>(output: &mut W, value: &T) -> anyhow::Result<()>
where
    W: Write + ?Sized,
    T: serde::Serialize,
{
    serde_json::to_writer(&mut *output, value)?;
    writeln!(output)?;
    Ok(())
}
