use crate::models::disc_info::DiscInfo;
use crate::models::mkv::{MkvData, CINFO, MSG, PRGC, PRGT, PRGV, SINFO, TCOUNT, TINFO};
use crate::services::disc_info_builder::DiscInfoBuilder;
use log::trace;
use std::io::BufRead;

/// Splits a robot-mode line into its record prefix and the raw field list.
/// Lines without a colon have no prefix and are skipped.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    line.trim_end_matches(['\r', '\n']).split_once(':')
}

/// Removes one comma-delimited integer from the front of `content`.
/// Returns the integer and the remainder, or `None` when there is no comma
/// or the field isn't a base-10 integer.
pub fn cut_int(content: &str) -> Option<(i32, &str)> {
    let (field, rest) = content.split_once(',')?;
    let value = field.trim().parse::<i32>().ok()?;
    Some((value, rest))
}

/// Strips the surrounding double quotes from a payload value. Embedded
/// quotes are not unescaped.
pub fn trim_value(value: &str) -> &str {
    value.trim_matches('"')
}

/// Decodes one robot-mode line. Ignored prefixes (`DRV`, anything unknown)
/// and malformed records come back as `None`.
pub fn decode_line(line: &str) -> Option<MkvData> {
    let (prefix, content) = split_line(line)?;
    let decoded = match prefix {
        "TCOUNT" => parse_tcount(content),
        "CINFO" => parse_cinfo(content),
        "TINFO" => parse_tinfo(content),
        "SINFO" => parse_sinfo(content),
        "PRGV" => parse_prgv(content),
        "PRGT" => parse_progress_label(content).map(|(code, id, name)| {
            MkvData::PRGT(PRGT { code, id, name })
        }),
        "PRGC" => parse_progress_label(content).map(|(code, id, name)| {
            MkvData::PRGC(PRGC { code, id, name })
        }),
        "MSG" => parse_msg(content),
        _ => return None,
    };
    if decoded.is_none() {
        trace!("Dropping malformed {prefix} record: {content}");
    }
    decoded
}

fn parse_tcount(content: &str) -> Option<MkvData> {
    let title_count = content.trim().parse::<i32>().ok()?;
    Some(MkvData::TCOUNT(TCOUNT { title_count }))
}

fn parse_cinfo(content: &str) -> Option<MkvData> {
    let (attribute, content) = cut_int(content)?;
    let (code, value) = cut_int(content)?;
    Some(MkvData::CINFO(CINFO {
        attribute,
        code,
        value: trim_value(value).to_string(),
    }))
}

fn parse_tinfo(content: &str) -> Option<MkvData> {
    let (title_id, content) = cut_int(content)?;
    let (attribute, content) = cut_int(content)?;
    let (code, value) = cut_int(content)?;
    Some(MkvData::TINFO(TINFO {
        title_id,
        attribute,
        code,
        value: trim_value(value).to_string(),
    }))
}

fn parse_sinfo(content: &str) -> Option<MkvData> {
    let (title_id, content) = cut_int(content)?;
    let (stream_id, content) = cut_int(content)?;
    let (attribute, content) = cut_int(content)?;
    let (code, value) = cut_int(content)?;
    Some(MkvData::SINFO(SINFO {
        title_id,
        stream_id,
        attribute,
        code,
        value: trim_value(value).to_string(),
    }))
}

fn parse_prgv(content: &str) -> Option<MkvData> {
    let (current, content) = cut_int(content)?;
    let (total, pmax) = cut_int(content)?;
    let pmax = pmax.trim().parse::<i32>().ok()?;
    Some(MkvData::PRGV(PRGV {
        current,
        total,
        pmax,
    }))
}

// PRGT/PRGC: code,id,name
fn parse_progress_label(content: &str) -> Option<(i32, i32, String)> {
    let (code, content) = cut_int(content)?;
    let (id, name) = cut_int(content)?;
    Some((code, id, trim_value(name).to_string()))
}

// MSG: code,flags,count,message,format,param0,...
fn parse_msg(content: &str) -> Option<MkvData> {
    let (code, content) = cut_int(content)?;
    let (flags, content) = cut_int(content)?;
    let (_count, content) = cut_int(content)?;
    let message = match content.split_once("\",\"") {
        Some((message, _)) => message,
        None => content,
    };
    Some(MkvData::MSG(MSG {
        code,
        flags,
        message: trim_value(message).to_string(),
    }))
}

/// Builds a `DiscInfo` from the captured stdout of `makemkvcon -r info`.
pub fn parse_disc_info(stdout_str: &str) -> DiscInfo {
    let mut builder = DiscInfoBuilder::new();
    for line in stdout_str.lines() {
        if let Some(record) = decode_line(line) {
            builder.apply(record);
        }
    }
    builder.finish()
}

/// Same as [`parse_disc_info`] but reads lines from `reader`. Only a read
/// failure is an error; bad records are skipped.
pub fn parse_disc_info_from<R: BufRead>(reader: R) -> std::io::Result<DiscInfo> {
    let mut builder = DiscInfoBuilder::new();
    for line in reader.lines() {
        if let Some(record) = decode_line(&line?) {
            builder.apply(record);
        }
    }
    Ok(builder.finish())
}
