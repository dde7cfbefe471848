//! Purpose: Provide one-call conversions from YAML text or readers to JSON.
//! Exports: `ApiResult`, `yaml_to_json`, `translate_str`, `translate_reader`.
//! Role: Convenience boundary for the CLI and library callers; wires source, sink and options.
//! Invariants: Readers go through `read_input` so reader failures keep their categories.
//! Invariants: Output is streamed to the sink as events arrive; nothing is rolled back.
use std::io::{Read, Write};

use crate::core::error::{Error, ErrorKind};
use crate::core::options::TranslateOptions;
use crate::core::source::{YamlEvents, read_input};
use crate::core::translate::{Summary, translate};

pub type ApiResult<T> = Result<T, Error>;

/// Translates YAML text already in memory, streaming JSON into `out`.
pub fn translate_str<W>(
    input: &str,
    out: &mut W,
    options: &TranslateOptions,
) -> ApiResult<Summary>
where
    W: Write + ?Sized,
{
    let mut source = YamlEvents::new(input);
    translate(&mut source, out, options)
}

/// Reads and validates all of `reader`, then translates it into `out`.
pub fn translate_reader<R, W>(
    reader: R,
    out: &mut W,
    options: &TranslateOptions,
) -> ApiResult<Summary>
where
    R: Read,
    W: Write + ?Sized,
{
    let input = read_input(reader)?;
    translate_str(&input, out, options)
}

/// Translates YAML text into a JSON string.
pub fn yaml_to_json(input: &str, options: &TranslateOptions) -> ApiResult<String> {
    let mut out = Vec::new();
    translate_str(input, &mut out, options)?;
    String::from_utf8(out).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("translated output is not UTF-8")
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{translate_reader, yaml_to_json};
    use crate::core::error::ErrorKind;
    use crate::core::options::TranslateOptions;

    #[test]
    fn yaml_to_json_converts_block_mapping() {
        let json = yaml_to_json("a: 1\nb: [x, 'y']\n", &TranslateOptions::default())
            .expect("translate");
        assert_eq!(json, "{ \"a\": 1, \"b\": [ \"x\", \"y\" ] }\n");
    }

    #[test]
    fn translate_reader_rejects_invalid_utf8_before_output() {
        let mut out = Vec::new();
        let err = translate_reader(&b"- \xfe\n"[..], &mut out, &TranslateOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(out.is_empty());
    }

    #[test]
    fn translate_reader_reports_summary() {
        let mut out = Vec::new();
        let summary = translate_reader(
            "- 1\n---\n- 2\n".as_bytes(),
            &mut out,
            &TranslateOptions::default(),
        )
        .expect("translate");
        assert_eq!(summary.documents, 2);
        assert_eq!(String::from_utf8(out).expect("utf8"), "[ 1 ]\n[ 2 ]\n");
    }
}
