use crate::error::RenderError;
use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, StringFormat, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes a PDF body object by object and emits the page tree, resources,
/// catalog and cross-reference table on [`StreamingPdfWriter::finish`].
///
/// Objects 1..=3 are reserved for the shared resources dictionary, the page
/// tree root and the catalog so pages can reference them before they exist.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    offsets: BTreeMap<u32, u64>,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    info: Option<Dictionary>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n%âãÏÓ\n", version).as_bytes())?;
        Ok(Self {
            writer,
            offsets: BTreeMap::new(),
            max_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            page_ids: Vec::new(),
            info: None,
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    /// Writes an object immediately and returns its id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        self.write_object_at_id(id, &object)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let bytes = content.encode()?;
        Ok(self.write_object(Object::Stream(Stream::new(dictionary! {}, bytes)))?)
    }

    /// Appends a page that draws `content_id` on a `width` x `height` point
    /// media box.
    pub fn write_page(&mut self, content_id: ObjectId, width: f32, height: f32) -> io::Result<ObjectId> {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let id = self.write_object(page.into())?;
        self.page_ids.push(id);
        Ok(id)
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self, resources: Dictionary) -> io::Result<W> {
        self.write_object_at_id(self.resources_id, &resources.into())?;

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.write_object_at_id(self.pages_id, &pages.into())?;

        let catalog = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.write_object_at_id(self.catalog_id, &catalog.into())?;

        let info_id = match self.info.take() {
            Some(info) => Some(self.write_object(info.into())?),
            None => None,
        };

        let xref_start = self.writer.stream_position()?;
        self.write_xref()?;

        let mut trailer = dictionary! { "Size" => (self.max_id + 1) as i64, "Root" => self.catalog_id };
        if let Some(id) = info_id {
            trailer.set("Info", id);
        }
        writeln!(self.writer, "trailer")?;
        serialize::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_object_at_id(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        let offset = self.writer.stream_position()?;
        self.offsets.insert(id.0, offset);
        writeln!(self.writer, "{} {} obj", id.0, id.1)?;
        serialize::write_object(&mut self.writer, object)?;
        writeln!(self.writer, "\nendobj")?;
        Ok(())
    }

    /// One subsection covering every id; ids that were allocated but never
    /// written are listed as free.
    fn write_xref(&mut self) -> io::Result<()> {
        writeln!(self.writer, "xref")?;
        writeln!(self.writer, "0 {}", self.max_id + 1)?;
        writeln!(self.writer, "0000000000 65535 f ")?;
        for id in 1..=self.max_id {
            match self.offsets.get(&id) {
                Some(offset) => writeln!(self.writer, "{:010} 00000 n ", offset)?,
                None => writeln!(self.writer, "0000000000 00001 f ")?,
            }
        }
        Ok(())
    }
}

mod serialize {
    use super::*;

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => write!(writer, "{:.3}", r),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, StringFormat::Literal) => {
                writer.write_all(b"(")?;
                for &byte in s {
                    if matches!(byte, b'(' | b')' | b'\\') {
                        writer.write_all(b"\\")?;
                    }
                    writer.write_all(&[byte])?;
                }
                writer.write_all(b")")
            }
            Object::String(s, StringFormat::Hexadecimal) => {
                writer.write_all(b"<")?;
                for byte in s {
                    write!(writer, "{:02X}", byte)?;
                }
                writer.write_all(b">")
            }
            Object::Array(items) => {
                writer.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, item)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        let sorted: BTreeMap<_, _> = dict.iter().collect();
        for (key, value) in sorted {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use std::io::Cursor;

    #[test]
    fn writes_a_loadable_single_page_document() {
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7").unwrap();
        let content = Content {
            operations: vec![Operation::new("re", vec![10.into(), 10.into(), 50.into(), 50.into()]), Operation::new("f", vec![])],
        };
        let content_id = writer.write_content_stream(content).unwrap();
        writer.write_page(content_id, 595.0, 842.0).unwrap();
        let bytes = writer.finish(Dictionary::new()).unwrap().into_inner();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn escapes_literal_string_delimiters() {
        let mut out = Vec::new();
        let obj = Object::String(b"a(b)c\\".to_vec(), StringFormat::Literal);
        serialize::write_object(&mut out, &obj).unwrap();
        assert_eq!(out, b"(a\\(b\\)c\\\\)");
    }
}
