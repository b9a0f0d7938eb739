//! Validated forms, and the modals that drive them
//!
//! Every editable thing has a form struct. A form starts out blank (or
//! pre-filled from an existing record), collects user input as plain fields,
//! and turns into a draft only once [`validator`] is happy with it.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};
use chrono::{NaiveDate, NaiveTime};

use crate::client::{ClientDraft, ClientRecord};
use crate::event::Event;
use crate::list::ListView;
use crate::product::{Currency, Product, ProductDraft};
use crate::task::{Priority, Task};
use crate::traits::{TableRecord, TableSource};

/// A form that edits one kind of [`TableRecord`]
pub trait RecordForm: Default {
    type Record: TableRecord;

    /// Pre-fills the form from an existing record
    fn from_record(record: &Self::Record) -> Self;

    /// Checks the input and turns it into a draft the store can take
    fn to_draft(&self) -> Result<<Self::Record as TableRecord>::Draft, ValidationErrors>;
}


#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1, message = "Please enter the client name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please enter the company"))]
    pub company: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter a phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Please enter the RUT"))]
    pub tax_id: String,
}

impl From<&ClientForm> for ClientDraft {
    fn from(form: &ClientForm) -> Self {
        Self {
            name: form.name.clone(),
            company: form.company.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            tax_id: form.tax_id.clone(),
        }
    }
}

impl RecordForm for ClientForm {
    type Record = ClientRecord;

    fn from_record(record: &ClientRecord) -> Self {
        Self {
            name: record.name().to_string(),
            company: record.company().to_string(),
            email: record.email().to_string(),
            phone: record.phone().to_string(),
            tax_id: record.tax_id().to_string(),
        }
    }

    fn to_draft(&self) -> Result<ClientDraft, ValidationErrors> {
        self.validate()?;
        Ok(ClientDraft::from(self))
    }
}


#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, message = "Please enter the product code"))]
    pub code: String,
    #[validate(length(min = 1, message = "Please enter the product name"))]
    pub name: String,
    pub description: String,
    #[validate(required(message = "Please enter a price"), range(min = 0.0, message = "The price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(required(message = "Please pick a currency"))]
    pub currency: Option<Currency>,
}

impl From<&ProductForm> for ProductDraft {
    fn from(form: &ProductForm) -> Self {
        Self {
            code: form.code.clone(),
            name: form.name.clone(),
            description: form.description.clone(),
            price: form.price.unwrap_or(0.0),
            currency: form.currency.unwrap_or(Currency::Usd),
        }
    }
}

impl RecordForm for ProductForm {
    type Record = Product;

    fn from_record(record: &Product) -> Self {
        Self {
            code: record.code().to_string(),
            name: record.name().to_string(),
            description: record.description().to_string(),
            price: Some(record.price()),
            currency: Some(record.currency()),
        }
    }

    fn to_draft(&self) -> Result<ProductDraft, ValidationErrors> {
        self.validate()?;
        Ok(ProductDraft::from(self))
    }
}


/// The form behind the "new task" modal
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct TaskForm {
    #[validate(length(min = 1, message = "Please enter a title"))]
    pub title: String,
    #[validate(required(message = "Please pick a priority"))]
    pub priority: Option<Priority>,
    pub reminder: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            priority: Some(task.priority()),
            reminder: task.reminder(),
            tags: task.tags().to_vec(),
        }
    }

    /// Checks the input and mints a new task from it
    pub fn to_task(&self) -> Result<Task, ValidationErrors> {
        self.validate()?;
        Ok(Task::new_with_parameters(
            self.title.clone(),
            self.priority.unwrap_or(Priority::Medium),
            self.reminder,
            self.tags.clone(),
        ))
    }
}


/// The form behind the "new event" modal. The date is not part of the form,
/// the agenda page already knows which day is open
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct EventForm {
    #[validate(length(min = 1, message = "Please enter a title"))]
    pub title: String,
    #[validate(required(message = "Please pick a time"))]
    pub time: Option<NaiveTime>,
    #[validate(length(min = 1, message = "Please pick a tag"))]
    pub tag: String,
    pub description: String,
}

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title().to_string(),
            time: Some(event.time()),
            tag: event.tag().to_string(),
            description: event.description().to_string(),
        }
    }

    /// Checks the input and mints a new event on `date`
    pub fn to_event(&self, date: NaiveDate) -> Result<Event, ValidationErrors> {
        self.validate()?;
        let time = self.time.unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        Ok(Event::new(
            self.title.clone(),
            date,
            time,
            self.tag.clone(),
            self.description.clone(),
        ))
    }
}


/// The create-or-edit dialog of a list page
///
/// The modal owns its form. Opening it blank or pre-filled decides whether a
/// later [`EntryModal::submit`] inserts or updates, and the modal only closes
/// once the store accepted the row. A rejected submit leaves the form on
/// screen so nothing the user typed is lost.
#[derive(Clone, Debug)]
pub struct EntryModal<F: RecordForm> {
    form: F,
    editing: Option<<F::Record as TableRecord>::Id>,
    visible: bool,
}

impl<F: RecordForm> EntryModal<F> {
    pub fn new() -> Self {
        Self {
            form: F::default(),
            editing: None,
            visible: false,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// The id of the record being edited, or None when the modal creates a new one
    pub fn editing(&self) -> Option<&<F::Record as TableRecord>::Id> {
        self.editing.as_ref()
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Opens the modal with a blank form, to create a new record
    pub fn open_blank(&mut self) {
        self.form = F::default();
        self.editing = None;
        self.visible = true;
    }

    /// Opens the modal pre-filled with an existing record, to edit it
    pub fn open_edit(&mut self, record: &F::Record) {
        self.form = F::from_record(record);
        self.editing = Some(TableRecord::id(record).clone());
        self.visible = true;
    }

    /// Closes the modal and forgets everything that was typed
    pub fn cancel(&mut self) {
        self.visible = false;
        self.form = F::default();
        self.editing = None;
    }

    /// Validates the form and pushes it to the list
    ///
    /// Returns `Err` when the form does not validate (the modal stays open and
    /// untouched), `Ok(false)` when the store turned the row down (still open),
    /// and `Ok(true)` once the row went through and the modal closed itself.
    pub async fn submit<S: TableSource<F::Record>>(
        &mut self,
        list: &mut ListView<F::Record, S>,
    ) -> Result<bool, ValidationErrors> {
        let draft = self.form.to_draft()?;
        let accepted = match &self.editing {
            Some(id) => list.update(id, &draft).await,
            None => list.create(&draft).await,
        };
        if accepted {
            self.cancel();
        }
        Ok(accepted)
    }
}

impl<F: RecordForm> Default for EntryModal<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub type ClientModal = EntryModal<ClientForm>;
pub type ProductModal = EntryModal<ProductForm>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_valid_client_form_maps_every_field() {
        let form = ClientForm {
            name: "Ada".to_string(),
            company: "Lovelace SpA".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+56 9 1111 1111".to_string(),
            tax_id: "11.111.111-1".to_string(),
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.company, "Lovelace SpA");
        assert_eq!(draft.email, "ada@example.com");
        assert_eq!(draft.phone, "+56 9 1111 1111");
        assert_eq!(draft.tax_id, "11.111.111-1");
    }

    #[test]
    fn a_bogus_email_is_turned_down() {
        let form = ClientForm {
            name: "Ada".to_string(),
            company: "Lovelace SpA".to_string(),
            email: "not-an-email".to_string(),
            phone: "+56 9 1111 1111".to_string(),
            tax_id: "11.111.111-1".to_string(),
        };
        let errors = form.to_draft().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
