//! Sample handler groups served by the binary.

use std::collections::BTreeMap;

use crate::convert::{Record, Symbolic, ToDocument};
use crate::dispatch::DispatchError;
use crate::impl_to_document;
use crate::routing::{HandlerGroup, ParamKind, ParamSpec, Routes};

/// Largest string `ApiController::args` will build, in bytes.
pub const MAX_REPEAT_BYTES: usize = 1 << 20;

/// Endpoints under `/api/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiController;

impl ApiController {
    pub fn ints(&self) -> Vec<i32> {
        vec![1, 2, 3]
    }

    pub fn pair(&self) -> (String, String) {
        ("um".to_string(), "dois".to_string())
    }

    pub fn path_var(&self, pathvar: &str) -> String {
        format!("{}!", pathvar)
    }

    pub fn args(&self, n: i64, text: &str) -> Result<BTreeMap<String, String>, DispatchError> {
        let times = usize::try_from(n)
            .map_err(|_| DispatchError::handler(format!("repeat count {} is negative", n)))?;
        match text.len().checked_mul(times) {
            Some(len) if len <= MAX_REPEAT_BYTES => {}
            _ => {
                return Err(DispatchError::handler(format!(
                    "repeating {} bytes {} times exceeds {} bytes",
                    text.len(),
                    n,
                    MAX_REPEAT_BYTES
                )))
            }
        }
        Ok(BTreeMap::from([(text.to_string(), text.repeat(times))]))
    }

    pub fn counts(&self) -> BTreeMap<i32, i32> {
        BTreeMap::from([(1, 10), (2, 20)])
    }
}

impl HandlerGroup for ApiController {
    fn base_tag(&self) -> &str {
        "api"
    }

    fn register(&self, routes: &mut Routes<Self>) {
        routes
            .handler("ints", |api, _| Ok(Box::new(api.ints())))
            .at("ints");
        routes
            .handler("pair", |api, _| Ok(Box::new(api.pair())))
            .at("pair");
        routes
            .handler("path_var", |api, args| {
                Ok(Box::new(api.path_var(args.str("pathvar")?)))
            })
            .at("path/{pathvar}")
            .param(ParamSpec::path("pathvar", ParamKind::Str));
        routes
            .handler("args", |api, args| {
                Ok(Box::new(api.args(args.int("n")?, args.str("text")?)?))
            })
            .at("args")
            .param(ParamSpec::query("n", ParamKind::Int))
            .param(ParamSpec::query("text", ParamKind::Str));
        // No coercion exists for list parameters; every call fails.
        routes
            .handler("sum", |_, _| Ok(Box::new(0)))
            .at("sum")
            .param(ParamSpec::query("values", ParamKind::Other("List<Int>")));
        routes
            .handler("counts", |api, _| Ok(Box::new(api.counts())))
            .at("counts");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
}

impl Symbolic for Role {
    fn symbol(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }
}

impl_to_document!(symbolic Role);

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub role: Role,
}

impl Record for Person {
    fn type_name(&self) -> &'static str {
        "Person"
    }

    fn describe(&self) -> Vec<(&'static str, &dyn ToDocument)> {
        vec![("name", &self.name), ("age", &self.age), ("role", &self.role)]
    }
}

impl_to_document!(record Person);

/// Endpoints under `/people/`, backed by a fixed directory.
#[derive(Debug, Clone)]
pub struct PeopleController {
    people: Vec<Person>,
}

impl Default for PeopleController {
    fn default() -> Self {
        Self {
            people: vec![
                Person {
                    name: "Guilherme".to_string(),
                    age: 21,
                    role: Role::Student,
                },
                Person {
                    name: "Ana".to_string(),
                    age: 45,
                    role: Role::Teacher,
                },
            ],
        }
    }
}

impl PeopleController {
    pub fn first(&self) -> Option<Person> {
        self.people.first().cloned()
    }

    pub fn all(&self) -> Vec<Person> {
        self.people.clone()
    }

    pub fn person_at(&self, index: i64) -> Result<Person, DispatchError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.people.get(i))
            .cloned()
            .ok_or_else(|| DispatchError::handler(format!("no person at index {}", index)))
    }

    pub fn adults(&self, min_age: i64) -> Vec<String> {
        self.people
            .iter()
            .filter(|p| i64::from(p.age) >= min_age)
            .map(|p| p.name.clone())
            .collect()
    }
}

impl HandlerGroup for PeopleController {
    fn base_tag(&self) -> &str {
        "people"
    }

    fn register(&self, routes: &mut Routes<Self>) {
        routes
            .handler("first", |people, _| Ok(Box::new(people.first())))
            .at("first");
        routes
            .handler("all", |people, _| Ok(Box::new(people.all())))
            .at("all");
        routes
            .handler("person_at", |people, args| {
                Ok(Box::new(people.person_at(args.int("i")?)?))
            })
            .at("index/{i}")
            .param(ParamSpec::path("i", ParamKind::Int));
        routes
            .handler("adults", |people, args| {
                Ok(Box::new(people.adults(args.int("min_age")?)))
            })
            .at("adults")
            .param(ParamSpec::query("min_age", ParamKind::Int));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_repeats_text() {
        let result = ApiController.args(3, "ab").unwrap();
        assert_eq!(result.get("ab").map(String::as_str), Some("ababab"));
        assert_eq!(ApiController.args(0, "ab").unwrap()["ab"], "");
    }

    #[test]
    fn test_args_rejects_negative_count() {
        let err = ApiController.args(-1, "PA").unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_args_rejects_oversized_result() {
        for n in [i64::MAX, (MAX_REPEAT_BYTES / 2 + 1) as i64] {
            let err = ApiController.args(n, "PA").unwrap_err();
            assert!(matches!(err, DispatchError::Handler(_)));
        }
        let at_limit = ApiController.args((MAX_REPEAT_BYTES / 2) as i64, "PA").unwrap();
        assert_eq!(at_limit["PA"].len(), MAX_REPEAT_BYTES);
        // Empty text never grows.
        assert_eq!(ApiController.args(i64::MAX, "").unwrap()[""], "");
    }

    #[test]
    fn test_person_at_out_of_range() {
        let people = PeopleController::default();
        assert_eq!(people.person_at(1).unwrap().name, "Ana");
        assert!(people.person_at(2).is_err());
        assert!(people.person_at(-1).is_err());
    }
}
