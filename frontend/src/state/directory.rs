use crate::api::{ApiClient, ApiError, EmployeeId, EmployeeResponse};
use leptos::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    pub role: String,
    pub email: Option<String>,
    pub employee_number: Option<String>,
}

impl From<EmployeeResponse> for Employee {
    fn from(value: EmployeeResponse) -> Self {
        Self {
            id: value.id,
            last_name: value.nom,
            first_name: value.prenom,
            role: value.poste,
            email: value.adresse_mail,
            employee_number: value.matricule,
        }
    }
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    /// Text written back into the search box once the employee is picked.
    pub fn display_label(&self) -> String {
        format!("{} {} - {}", self.last_name, self.first_name, self.role)
    }

    fn matches(&self, needle: &str) -> bool {
        [
            self.full_name(),
            self.display_label(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.role.clone(),
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedEmployee {
    pub id: EmployeeId,
    pub full_name: String,
    pub last_name: String,
    pub first_name: String,
}

impl From<&Employee> for SelectedEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            full_name: employee.full_name(),
            last_name: employee.last_name.clone(),
            first_name: employee.first_name.clone(),
        }
    }
}

/// Case-insensitive substring search over name and role, in roster order.
/// A blank query yields no suggestions at all.
pub fn search_employees(query: &str, roster: &[Employee]) -> Vec<Employee> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    roster
        .iter()
        .filter(|employee| employee.matches(&needle))
        .cloned()
        .collect()
}

pub async fn load_roster(api: &ApiClient) -> Result<Vec<Employee>, ApiError> {
    match api.list_active_employees().await {
        Ok(list) => {
            log::info!("loaded {} active employees", list.len());
            Ok(list.into_iter().map(Employee::from).collect())
        }
        Err(err) => {
            log::error!("failed to load employee roster: {}", err);
            Err(err)
        }
    }
}

pub type RosterResource = Resource<(), Result<Vec<Employee>, ApiError>>;

/// Roster fetched once per page load and shared by every search box.
#[derive(Clone, Copy)]
pub struct EmployeeDirectory {
    roster: RosterResource,
}

impl EmployeeDirectory {
    pub fn new(api: ApiClient) -> Self {
        let api = store_value(api);
        let roster = create_resource(
            || (),
            move |_| {
                let api = api.get_value();
                async move { load_roster(&api).await }
            },
        );
        Self { roster }
    }

    /// Loaded employees; empty while loading or after a failed load.
    pub fn employees(&self) -> Signal<Vec<Employee>> {
        let roster = self.roster;
        Signal::derive(move || {
            roster
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        })
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let roster = self.roster;
        Signal::derive(move || roster.get().and_then(|result| result.err()))
    }

    pub fn loading(&self) -> Signal<bool> {
        self.roster.loading().into()
    }

    pub fn reload(&self) {
        log::info!("reloading employee roster");
        self.roster.refetch();
    }
}

pub fn use_employee_directory() -> EmployeeDirectory {
    match use_context::<EmployeeDirectory>() {
        Some(directory) => directory,
        None => {
            let api = use_context::<ApiClient>().unwrap_or_default();
            let directory = EmployeeDirectory::new(api);
            provide_context(directory);
            directory
        }
    }
}

/// Search box state of one form: typed query, suggestion list visibility and
/// the employee currently picked.
#[derive(Clone, Copy)]
pub struct EmployeeSearchState {
    query: RwSignal<String>,
    open: RwSignal<bool>,
    selected: RwSignal<Option<SelectedEmployee>>,
}

impl Default for EmployeeSearchState {
    fn default() -> Self {
        Self {
            query: create_rw_signal(String::new()),
            open: create_rw_signal(false),
            selected: create_rw_signal(None),
        }
    }
}

impl EmployeeSearchState {
    pub fn query_signal(&self) -> RwSignal<String> {
        self.query
    }

    pub fn open_signal(&self) -> RwSignal<bool> {
        self.open
    }

    pub fn selected(&self) -> Option<SelectedEmployee> {
        self.selected.get_untracked()
    }

    /// Handles a keystroke. Returns `true` when the selection was dropped
    /// because the box was emptied.
    pub fn input(&self, value: String) -> bool {
        let blank = value.trim().is_empty();
        self.query.set(value);
        self.open.set(!blank);
        if blank && self.selected.get_untracked().is_some() {
            self.selected.set(None);
            return true;
        }
        false
    }

    pub fn focus(&self, has_suggestions: bool) {
        if !self.query.get_untracked().trim().is_empty() && has_suggestions {
            self.open.set(true);
        }
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    pub fn select(&self, employee: &Employee) -> SelectedEmployee {
        let selected = SelectedEmployee::from(employee);
        self.query.set(employee.display_label());
        self.selected.set(Some(selected.clone()));
        self.open.set(false);
        selected
    }

    pub fn reset(&self) {
        self.query.set(String::new());
        self.open.set(false);
        self.selected.set(None);
    }
}
