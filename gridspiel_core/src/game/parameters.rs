use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use crate::error::GameError;

/// Value of single game parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterValue{
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(String),
}

impl ParameterValue{
    /// Name of variant used in error messages.
    pub fn kind_name(&self) -> &'static str{
        match self{
            ParameterValue::Int(_) => "integer",
            ParameterValue::Double(_) => "double",
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Str(_) => "string",
        }
    }

    pub fn as_int(&self) -> Option<i64>{
        match self{
            ParameterValue::Int(i) => Some(*i),
            _ => None
        }
    }

    /// Integers are accepted where double is expected.
    pub fn as_double(&self) -> Option<f64>{
        match self{
            ParameterValue::Double(d) => Some(*d),
            ParameterValue::Int(i) => Some(*i as f64),
            _ => None
        }
    }

    pub fn as_bool(&self) -> Option<bool>{
        match self{
            ParameterValue::Bool(b) => Some(*b),
            _ => None
        }
    }

    pub fn as_str(&self) -> Option<&str>{
        match self{
            ParameterValue::Str(s) => Some(s),
            _ => None
        }
    }

    /// Checks if value can be used in place of `other` (its type is compatible).
    pub fn compatible_with(&self, other: &ParameterValue) -> bool{
        matches!((self, other),
            (ParameterValue::Int(_), ParameterValue::Int(_))
            | (ParameterValue::Int(_), ParameterValue::Double(_))
            | (ParameterValue::Double(_), ParameterValue::Double(_))
            | (ParameterValue::Bool(_), ParameterValue::Bool(_))
            | (ParameterValue::Str(_), ParameterValue::Str(_))
        )
    }
}

impl Display for ParameterValue{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            ParameterValue::Int(i) => write!(f, "{i}"),
            ParameterValue::Double(d) => write!(f, "{d:?}"),
            ParameterValue::Bool(b) => write!(f, "{b}"),
            ParameterValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ParameterValue{
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}
impl From<i32> for ParameterValue{
    fn from(value: i32) -> Self {
        ParameterValue::Int(value as i64)
    }
}
impl From<usize> for ParameterValue{
    fn from(value: usize) -> Self {
        ParameterValue::Int(value as i64)
    }
}
impl From<f64> for ParameterValue{
    fn from(value: f64) -> Self {
        ParameterValue::Double(value)
    }
}
impl From<bool> for ParameterValue{
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}
impl From<&str> for ParameterValue{
    fn from(value: &str) -> Self {
        ParameterValue::Str(value.to_string())
    }
}
impl From<String> for ParameterValue{
    fn from(value: String) -> Self {
        ParameterValue::Str(value)
    }
}

/// Set of named game parameters.
///
/// Getters take default value that is returned when parameter is not set,
/// they fail only when parameter is set with incompatible type.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameParameters{
    params: BTreeMap<String, ParameterValue>,
}

impl GameParameters{
    pub fn new() -> Self{
        Self::default()
    }

    /// Builder style insertion.
    pub fn with(mut self, name: &str, value: impl Into<ParameterValue>) -> Self{
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParameterValue>) -> Option<ParameterValue>{
        self.params.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue>{
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool{
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize{
        self.params.len()
    }

    pub fn is_empty(&self) -> bool{
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=(&String, &ParameterValue)>{
        self.params.iter()
    }

    fn type_error(name: &str, expected: &str, value: &ParameterValue) -> GameError{
        GameError::ParameterType {
            name: name.to_string(),
            expected: expected.to_string(),
            value: value.to_string(),
        }
    }

    pub fn int(&self, name: &str, default: i64) -> Result<i64, GameError>{
        match self.params.get(name){
            None => Ok(default),
            Some(v) => v.as_int().ok_or_else(|| Self::type_error(name, "integer", v))
        }
    }

    pub fn double(&self, name: &str, default: f64) -> Result<f64, GameError>{
        match self.params.get(name){
            None => Ok(default),
            Some(v) => v.as_double().ok_or_else(|| Self::type_error(name, "double", v))
        }
    }

    pub fn bool(&self, name: &str, default: bool) -> Result<bool, GameError>{
        match self.params.get(name){
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| Self::type_error(name, "bool", v))
        }
    }

    pub fn string(&self, name: &str, default: &str) -> Result<String, GameError>{
        match self.params.get(name){
            None => Ok(default.to_string()),
            Some(v) => v.as_str().map(|s| s.to_string()).ok_or_else(|| Self::type_error(name, "string", v))
        }
    }

    /// Integer parameter that must be in given inclusive range.
    pub fn int_in_range(&self, name: &str, default: i64, min: i64, max: i64) -> Result<i64, GameError>{
        let value = self.int(name, default)?;
        if value < min || value > max{
            return Err(GameError::InvalidParameter {
                name: name.to_string(),
                explanation: format!("value {value} is out of range {min}..={max}"),
            })
        }
        Ok(value)
    }

    /// Checks that every parameter set is known in `specification` and has compatible type.
    pub fn validate(&self, game: &str, specification: &GameParameters) -> Result<(), GameError>{
        for (name, value) in self.params.iter(){
            match specification.get(name){
                None => return Err(GameError::UnknownParameter {
                    game: game.to_string(),
                    name: name.clone()
                }),
                Some(default) => if !value.compatible_with(default){
                    return Err(Self::type_error(name, default.kind_name(), value))
                }
            }
        }
        Ok(())
    }
}

impl Display for GameParameters{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in self.params.iter(){
            if !first{
                write!(f, ",")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl FromIterator<(String, ParameterValue)> for GameParameters{
    fn from_iter<T: IntoIterator<Item=(String, ParameterValue)>>(iter: T) -> Self {
        Self{
            params: iter.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests{
    use crate::error::GameError;
    use crate::game::{GameParameters, ParameterValue};

    #[test]
    fn getters_with_defaults(){
        let params = GameParameters::new()
            .with("horizon", 50)
            .with("fully_observable", true);
        assert_eq!(params.int("horizon", 100), Ok(50));
        assert_eq!(params.int("rows", 8), Ok(8));
        assert_eq!(params.bool("fully_observable", false), Ok(true));
        assert_eq!(params.double("horizon", 1.0), Ok(50.0));
        assert!(matches!(params.bool("horizon", false), Err(GameError::ParameterType {..})));
    }

    #[test]
    fn validate_against_specification(){
        let spec = GameParameters::new().with("horizon", 100).with("fully_observable", false);
        let ok = GameParameters::new().with("horizon", 20);
        assert!(ok.validate("coop_box_pushing", &spec).is_ok());

        let unknown = GameParameters::new().with("players", 3);
        assert_eq!(unknown.validate("coop_box_pushing", &spec), Err(GameError::UnknownParameter {
            game: "coop_box_pushing".into(),
            name: "players".into()
        }));

        let wrong = GameParameters::new().with("fully_observable", "yes");
        assert!(wrong.validate("coop_box_pushing", &spec).is_err());
    }

    #[test]
    fn range_check(){
        let params = GameParameters::new().with("curriculum_level", 11);
        assert!(params.int_in_range("curriculum_level", 10, 0, 10).is_err());
        assert_eq!(GameParameters::new().int_in_range("curriculum_level", 10, 0, 10), Ok(10));
    }

    #[test]
    fn display_is_sorted(){
        let params = GameParameters::new()
            .with("rows", 6)
            .with("horizon", 50)
            .with("ratio", ParameterValue::Double(0.5));
        assert_eq!(params.to_string(), "horizon=50,ratio=0.5,rows=6");
    }
}
