use std::cell::OnceCell;
use std::collections::HashMap;

use super::http::{HttpMethod, HttpParameter};
use super::types::{Enum, Method, Service, Type};
use crate::naming::snake;

/// A generation session over one service description.
///
/// Owns the lookup tables used while rendering. Each table is built on first
/// use and dropped with the session, so two sessions never share state.
/// Method and parameter names are matched case-insensitively through their
/// snake_case form.
pub struct Session<'a> {
    service: &'a Service,
    methods: OnceCell<HashMap<String, &'a Method>>,
    http_methods: OnceCell<HashMap<String, &'a HttpMethod>>,
    http_parameters: OnceCell<HashMap<(String, String), &'a HttpParameter>>,
}

impl<'a> Session<'a> {
    pub fn new(service: &'a Service) -> Self {
        Self {
            service,
            methods: OnceCell::new(),
            http_methods: OnceCell::new(),
            http_parameters: OnceCell::new(),
        }
    }

    pub fn service(&self) -> &'a Service {
        self.service
    }

    /// Look up a method declared on any interface.
    pub fn method(&self, name: &str) -> Option<&'a Method> {
        self.methods
            .get_or_init(|| {
                self.service
                    .all_methods()
                    .map(|(_, m)| (snake(&m.name), m))
                    .collect()
            })
            .get(&snake(name))
            .copied()
    }

    /// The HTTP binding of a method, if it has one.
    pub fn http_method(&self, method_name: &str) -> Option<&'a HttpMethod> {
        self.http_methods
            .get_or_init(|| {
                let mut map = HashMap::new();
                for (_, path) in self.service.all_http_paths() {
                    for http_method in &path.methods {
                        map.entry(snake(&http_method.name)).or_insert(http_method);
                    }
                }
                map
            })
            .get(&snake(method_name))
            .copied()
    }

    /// The HTTP binding of one parameter of a method.
    pub fn http_parameter(
        &self,
        method_name: &str,
        parameter_name: &str,
    ) -> Option<&'a HttpParameter> {
        self.http_parameters
            .get_or_init(|| {
                let mut map = HashMap::new();
                for (_, path) in self.service.all_http_paths() {
                    for http_method in &path.methods {
                        for param in &http_method.parameters {
                            map.entry((snake(&http_method.name), snake(&param.name)))
                                .or_insert(param);
                        }
                    }
                }
                map
            })
            .get(&(snake(method_name), snake(parameter_name)))
            .copied()
    }

    pub fn type_by_name(&self, name: &str) -> Option<&'a Type> {
        self.service.type_by_name(name)
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&'a Enum> {
        self.service.enum_by_name(name)
    }
}
