use nom::character::complete::{digit1, space0};
use nom::combinator::{eof, map_res};
use nom::IResult;
use nom::Parser;


/// Trait for data that can be constructed with [`nom`] parser from text typed by user.
pub trait StrParsed: Sized{

    fn parse_from_str(input: &str) -> IResult<&str, Self>;
}

impl StrParsed for (){
    fn parse_from_str(input: &str) -> IResult<&str, Self> {
        Ok((input, ()))
    }
}

impl StrParsed for usize{
    fn parse_from_str(input: &str) -> IResult<&str, Self> {
        map_res(
            (digit1, space0),
            |(digits, _): (&str, &str)| digits.parse::<usize>()
        ).parse(input)
    }
}

/// Succeeds only on whitespace-only remainder.
pub fn blank(input: &str) -> IResult<&str, ()>{
    (space0, eof).map(|_| ()).parse(input)
}

#[cfg(test)]
mod tests{
    use crate::util::{blank, StrParsed};

    #[test]
    fn parse_usize_with_trailing_space(){
        assert_eq!(usize::parse_from_str("12  rest"), Ok(("rest", 12)));
        assert!(usize::parse_from_str("x12").is_err());
    }

    #[test]
    fn blank_accepts_only_spaces(){
        assert!(blank("   ").is_ok());
        assert!(blank("  a").is_err());
    }
}
