// Decorator: encryption and compression layers wrap a data source behind
// the same trait; stacking order changes what lands in the file.

use std::io;

use crate::transcript::Transcript;

pub trait DataSource {
    fn read(&self) -> String;
    fn write(&mut self, data: &str);
    /// Bytes as they sit in the underlying file, with no layer undone.
    fn stored(&self) -> String;
}

/// Concrete component: stands in for a file on disk.
pub struct FileDataSource {
    filename: String,
    contents: String,
}

impl FileDataSource {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            contents: String::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl DataSource for FileDataSource {
    fn read(&self) -> String {
        self.contents.clone()
    }

    fn write(&mut self, data: &str) {
        self.contents = data.to_string();
    }

    fn stored(&self) -> String {
        self.contents.clone()
    }
}

// ============================================================================
// Example: Decorators as trait objects
// ============================================================================

pub struct EncryptionDecorator {
    wrapped: Box<dyn DataSource>,
}

impl EncryptionDecorator {
    pub fn new(wrapped: Box<dyn DataSource>) -> Self {
        Self { wrapped }
    }
}

impl DataSource for EncryptionDecorator {
    fn read(&self) -> String {
        caesar(&self.wrapped.read(), -3)
    }

    fn write(&mut self, data: &str) {
        self.wrapped.write(&caesar(data, 3));
    }

    fn stored(&self) -> String {
        self.wrapped.stored()
    }
}

pub struct CompressionDecorator {
    wrapped: Box<dyn DataSource>,
}

impl CompressionDecorator {
    pub fn new(wrapped: Box<dyn DataSource>) -> Self {
        Self { wrapped }
    }
}

impl DataSource for CompressionDecorator {
    fn read(&self) -> String {
        decompress(&self.wrapped.read())
    }

    fn write(&mut self, data: &str) {
        self.wrapped.write(&compress(data));
    }

    fn stored(&self) -> String {
        self.wrapped.stored()
    }
}

/// Shifts ASCII letters, leaves everything else alone.
fn caesar(data: &str, shift: i8) -> String {
    data.chars()
        .map(|c| {
            let base = match c {
                'a'..='z' => b'a',
                'A'..='Z' => b'A',
                _ => return c,
            };
            let offset = (c as u8 - base) as i16 + shift as i16;
            (base + offset.rem_euclid(26) as u8) as char
        })
        .collect()
}

const COMPRESSED_OPEN: &str = "[compressed:";
const COMPRESSED_CLOSE: &str = "]";

fn compress(data: &str) -> String {
    format!("{COMPRESSED_OPEN}{data}{COMPRESSED_CLOSE}")
}

/// Data without the marker passes through unchanged.
fn decompress(data: &str) -> String {
    data.strip_prefix(COMPRESSED_OPEN)
        .and_then(|rest| rest.strip_suffix(COMPRESSED_CLOSE))
        .unwrap_or(data)
        .to_string()
}

// ============================================================================
// Example: Type-level decorators with generics
// ============================================================================

pub struct Shouting<T>(pub T);
pub struct Bracketed<T>(pub T);

pub trait Render {
    fn render(&self) -> String;
}

impl Render for &str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: Render> Render for Shouting<T> {
    fn render(&self) -> String {
        format!("{}!", self.0.render().to_uppercase())
    }
}

impl<T: Render> Render for Bracketed<T> {
    fn render(&self) -> String {
        format!("[{}]", self.0.render())
    }
}

#[derive(Debug, Clone, Copy)]
enum Layer {
    Encrypt,
    Compress,
}

/// Wraps a fresh file source; `layers` is listed innermost first.
fn stack(layers: &[Layer], filename: &str) -> Box<dyn DataSource> {
    let mut source: Box<dyn DataSource> = Box::new(FileDataSource::new(filename));
    for layer in layers {
        source = match layer {
            Layer::Encrypt => Box::new(EncryptionDecorator::new(source)),
            Layer::Compress => Box::new(CompressionDecorator::new(source)),
        };
    }
    source
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let message = "hello world";

    let stacks: [(&str, &[Layer]); 2] = [
        ("compress(encrypt(file))", &[Layer::Encrypt, Layer::Compress]),
        ("encrypt(compress(file))", &[Layer::Compress, Layer::Encrypt]),
    ];

    let mut stored_forms = Vec::new();
    for (label, layers) in stacks {
        let mut source = stack(layers, "data.txt");
        source.write(message);
        let read_back = source.read();
        out.line("stack", label)?;
        out.line("stored", source.stored())?;
        out.line("read-back", &read_back)?;
        out.check("roundtrip", read_back == message)?;
        stored_forms.push(source.stored());
    }
    out.check("order-observable", stored_forms[0] != stored_forms[1])?;

    out.line("generic", Bracketed(Shouting("hi")).render())?;
    out.line("generic", Shouting(Bracketed("hi")).render())?;
    Ok(())
}
