use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::io::{BufRead, Result as IoResult, Write};
use std::rc::Rc;

/// Source of raw input lines, one per prompt cycle.
///
/// The source is responsible for presenting `prompt` to the user.
/// `Ok(None)` means the input is exhausted.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Interactive line source backed by `rustyline`, with history.
pub struct EditorLines {
    editor: DefaultEditor,
}

impl EditorLines {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            // Ctrl-C abandons the line being typed
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Line source over any buffered reader; the prompt goes to `prompt_out`.
pub struct ReaderLines<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> ReaderLines<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderLines<R, W> {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        // bytes, not read_line: a line that is not UTF-8 must not end the session
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Memory-backed writer for capturing session output.
///
/// Clones share one buffer, so the prompt writer and the session output can
/// be interleaved into a single transcript.
#[derive(Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_lines_writes_prompt_and_strips_newline() {
        let out = MemWriter::new();
        let mut lines = ReaderLines::new(Cursor::new("ls -l\r\n\nlast"), out.clone());

        assert_eq!(lines.read_line("> ").unwrap(), Some("ls -l".to_string()));
        assert_eq!(lines.read_line("> ").unwrap(), Some(String::new()));
        assert_eq!(lines.read_line("> ").unwrap(), Some("last".to_string()));
        assert_eq!(lines.read_line("> ").unwrap(), None);
        assert_eq!(out.contents(), "> > > > ");
    }

    #[test]
    fn test_reader_lines_survives_invalid_utf8() {
        let input: &[u8] = b"ls \xff\xfe\nexit\n";
        let mut lines = ReaderLines::new(input, Vec::new());

        assert_eq!(
            lines.read_line("> ").unwrap(),
            Some("ls \u{FFFD}\u{FFFD}".to_string())
        );
        assert_eq!(lines.read_line("> ").unwrap(), Some("exit".to_string()));
        assert_eq!(lines.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_mem_writer_clones_share_buffer() {
        let mut a = MemWriter::new();
        let mut b = a.clone();
        write!(a, "one ").unwrap();
        write!(b, "two").unwrap();
        assert_eq!(a.contents(), "one two");
    }
}
