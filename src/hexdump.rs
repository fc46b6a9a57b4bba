/*!
  Parses a textual hex dump into bytes. Bytes are pairs of hex digits, optionally prefixed by
  `0x`, separated by whitespace or written back to back. A `#` starts a comment running to the
  end of the line.

  ```text
  ee 34 3412 21 03   # execute-inline
  0xff 0x06 10000000 ff00 0001
  ```
*/

use nom::{
  IResult,
  branch::alt,
  bytes::complete::{is_not, tag, take_while_m_n},
  character::complete::{char as one_char, multispace1},
  combinator::{all_consuming, map, map_res, opt, recognize},
  multi::{many0, many1},
  sequence::{pair, preceded, terminated},
};
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("malformed hex dump at byte {position} of the input")]
pub struct HexDumpError {
  pub position: usize
}

fn hex_byte_p(input: &str) -> IResult<&str, u8> {
  map_res(
    preceded(
      opt(tag("0x")),
      take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())
    ),
    |digits: &str| u8::from_str_radix(digits, 16)
  )(input)
}

fn comment_p(input: &str) -> IResult<&str, &str> {
  recognize(pair(one_char('#'), opt(is_not("\n\r"))))(input)
}

fn separator_p(input: &str) -> IResult<&str, ()> {
  map(many1(alt((multispace1, comment_p))), |_| ())(input)
}

pub fn parse_hex_dump(text: &str) -> Result<Vec<u8>, HexDumpError> {
  let dump_p = all_consuming(
    preceded(
      opt(separator_p),
      many0(terminated(hex_byte_p, opt(separator_p)))
    )
  );

  match dump_p(text) {
    Ok((_rest, bytes)) => Ok(bytes),
    Err(nom::Err::Error((rest, _kind))) | Err(nom::Err::Failure((rest, _kind))) => {
      Err(HexDumpError { position: text.len() - rest.len() })
    }
    Err(nom::Err::Incomplete(_)) => Err(HexDumpError { position: text.len() }),
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn spaced_bytes(){
    assert_eq!(parse_hex_dump("ee 34 34 12"), Ok(vec![0xEE, 0x34, 0x34, 0x12]));
  }

  #[test]
  fn packed_and_prefixed_bytes(){
    assert_eq!(parse_hex_dump("0xff 0x06 1000 FF"), Ok(vec![0xFF, 0x06, 0x10, 0x00, 0xFF]));
  }

  #[test]
  fn comments_and_newlines(){
    let text = "  # leading comment\nee 53   # execute-inline\n\n34 12\n";
    assert_eq!(parse_hex_dump(text), Ok(vec![0xEE, 0x53, 0x34, 0x12]));
  }

  #[test]
  fn empty_dump(){
    assert_eq!(parse_hex_dump(""), Ok(vec![]));
    assert_eq!(parse_hex_dump("   \n"), Ok(vec![]));
  }

  #[test]
  fn odd_digit_count_rejected(){
    assert_eq!(parse_hex_dump("ee 3"), Err(HexDumpError { position: 3 }));
  }

  #[test]
  fn non_hex_rejected(){
    assert_eq!(parse_hex_dump("ee zz"), Err(HexDumpError { position: 3 }));
  }
}
