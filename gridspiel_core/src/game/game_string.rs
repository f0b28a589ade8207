use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map, opt};
use nom::multi::separated_list0;
use nom::sequence::{delimited, separated_pair};
use nom::{IResult, Parser};
use crate::error::GameError;
use crate::game::{GameParameters, ParameterValue};

fn identifier(input: &str) -> IResult<&str, &str>{
    delimited(
        multispace0,
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        multispace0
    ).parse(input)
}

fn classify_value(raw: &str) -> ParameterValue{
    let raw = raw.trim();
    match raw{
        "true" | "True" => ParameterValue::Bool(true),
        "false" | "False" => ParameterValue::Bool(false),
        other => {
            if let Ok(i) = other.parse::<i64>(){
                ParameterValue::Int(i)
            } else if let Ok(d) = other.parse::<f64>(){
                ParameterValue::Double(d)
            } else {
                ParameterValue::Str(other.to_string())
            }
        }
    }
}

fn value(input: &str) -> IResult<&str, ParameterValue>{
    map(
        take_while1(|c: char| c != ',' && c != ')'),
        classify_value
    ).parse(input)
}

fn parameter(input: &str) -> IResult<&str, (String, ParameterValue)>{
    map(
        separated_pair(identifier, tag("="), value),
        |(name, value)| (name.to_string(), value)
    ).parse(input)
}

fn parameter_list(input: &str) -> IResult<&str, Vec<(String, ParameterValue)>>{
    delimited(
        char('('),
        separated_list0(char(','), parameter),
        (multispace0, char(')'), multispace0)
    ).parse(input)
}

fn game_string(input: &str) -> IResult<&str, (&str, Option<Vec<(String, ParameterValue)>>)>{
    all_consuming((
        identifier,
        opt(alt((parameter_list, map((char('('), multispace0, char(')')), |_| Vec::new()))))
    )).parse(input)
}

/// Parses game string in form `name` or `name(key=value,key=value)`.
///
/// Values `true`/`false` are booleans, then integers and floats are tried,
/// anything else is kept as string.
/// ```
/// use gridspiel_core::game::{parse_game_string, ParameterValue};
/// let (name, params) = parse_game_string("coop_box_pushing(fully_observable=true,horizon=100)").unwrap();
/// assert_eq!(name, "coop_box_pushing");
/// assert_eq!(params.get("horizon"), Some(&ParameterValue::Int(100)));
/// ```
pub fn parse_game_string(input: &str) -> Result<(String, GameParameters), GameError>{
    let (_, (name, params)) = game_string(input).map_err(|e| GameError::GameString {
        input: input.to_string(),
        explanation: format!("{e}"),
    })?;
    let params = params.unwrap_or_default().into_iter().collect();
    Ok((name.to_string(), params))
}

#[cfg(test)]
mod tests{
    use crate::game::{parse_game_string, ParameterValue};

    #[test]
    fn parse_plain_name(){
        let (name, params) = parse_game_string("companion_simple").unwrap();
        assert_eq!(name, "companion_simple");
        assert!(params.is_empty());
        let (name, params) = parse_game_string("companion_simple()").unwrap();
        assert_eq!(name, "companion_simple");
        assert!(params.is_empty());
    }

    #[test]
    fn parse_typed_parameters(){
        let (name, params) = parse_game_string(
            "companion_synchro(rows=6, cols=7,horizon=50,ratio=0.25,mode=fast,verbose=false)").unwrap();
        assert_eq!(name, "companion_synchro");
        assert_eq!(params.get("rows"), Some(&ParameterValue::Int(6)));
        assert_eq!(params.get("cols"), Some(&ParameterValue::Int(7)));
        assert_eq!(params.get("ratio"), Some(&ParameterValue::Double(0.25)));
        assert_eq!(params.get("mode"), Some(&ParameterValue::Str("fast".into())));
        assert_eq!(params.get("verbose"), Some(&ParameterValue::Bool(false)));
    }

    #[test]
    fn reject_malformed(){
        assert!(parse_game_string("").is_err());
        assert!(parse_game_string("coop_box_pushing(horizon=10").is_err());
        assert!(parse_game_string("coop_box_pushing(horizon)").is_err());
        assert!(parse_game_string("coop box").is_err());
    }
}
