use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;

use crate::db::DbPool;
use crate::domain::{
    campaign::{Campaign, NewCampaign, UpdateCampaign},
    company::{Company, NewCompany, UpdateCompany},
    contact::{Contact, NewContact, UpdateContact},
    contact_list::{
        ContactList, ContactListItem, NewContactList, NewContactListItem, UpdateContactListItem,
    },
    flow::{Flow, NewFlow, UpdateFlow},
    quick_message::{NewQuickMessage, QuickMessage, UpdateQuickMessage},
    schedule::{NewSchedule, Schedule, UpdateSchedule},
    setting::{CampaignSetting, Setting},
    tag::{NewTag, Tag, UpdateTag},
    ticket::{NewTicket, Ticket, UpdateTicket},
    types::{
        CampaignId, CampaignStatus, CompanyId, ContactId, ContactListId, ContactListItemId,
        ContactListName, FlowId, PhoneNumber, QuickMessageId, ResetToken, ScheduleId, TagId,
        TicketId, TicketStatus, UserEmail, UserId,
    },
    user::{NewUser, UpdateUser, User, UserCredentials},
};
use crate::repository::errors::RepositoryResult;

pub mod campaign;
pub mod company;
pub mod contact;
pub mod contact_list;
pub mod errors;
pub mod flow;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod quick_message;
pub mod schedule;
pub mod setting;
pub mod tag;
pub mod ticket;
pub mod user;

/// Diesel-backed repository implementing every reader and writer trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Pages are 1-based; page 0 is treated as the first page.
    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.per_page)
    }

    /// `LIMIT` value for SQL.
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }

    /// `OFFSET` value for SQL, clamped to the largest value SQLite accepts.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }
}

/// Builder methods shared by every list query.
macro_rules! list_query_common {
    ($name:ident) => {
        impl $name {
            pub fn search(mut self, search: impl Into<String>) -> Self {
                let search = search.into();
                let search = search.trim();
                self.search = if search.is_empty() {
                    None
                } else {
                    Some(search.to_string())
                };
                self
            }

            pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
                self.pagination = Some(Pagination { page, per_page });
                self
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct CompanyListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CompanyListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            pagination: None,
        }
    }
}

impl Default for CompanyListQuery {
    fn default() -> Self {
        Self::new()
    }
}

list_query_common!(CompanyListQuery);

#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(UserListQuery);

#[derive(Debug, Clone)]
pub struct TagListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub kanban: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl TagListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            kanban: None,
            pagination: None,
        }
    }

    pub fn kanban(mut self, kanban: bool) -> Self {
        self.kanban = Some(kanban);
        self
    }
}

list_query_common!(TagListQuery);

#[derive(Debug, Clone)]
pub struct ContactListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(ContactListQuery);

#[derive(Debug, Clone)]
pub struct TicketListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub statuses: Vec<TicketStatus>,
    /// When set, only tickets assigned to this user or unassigned are returned.
    pub visible_to: Option<UserId>,
    pub pagination: Option<Pagination>,
}

impl TicketListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            statuses: Vec::new(),
            visible_to: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn visible_to(mut self, user_id: UserId) -> Self {
        self.visible_to = Some(user_id);
        self
    }
}

list_query_common!(TicketListQuery);

#[derive(Debug, Clone)]
pub struct CampaignListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CampaignListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(CampaignListQuery);

#[derive(Debug, Clone)]
pub struct ScheduleListQuery {
    pub company_id: CompanyId,
    pub contact_id: Option<ContactId>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ScheduleListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            contact_id: None,
            search: None,
            pagination: None,
        }
    }

    pub fn contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }
}

list_query_common!(ScheduleListQuery);

#[derive(Debug, Clone)]
pub struct QuickMessageListQuery {
    pub company_id: CompanyId,
    /// Requester; shared (`geral`) records and the requester's own are returned.
    pub user_id: UserId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl QuickMessageListQuery {
    pub fn new(company_id: CompanyId, user_id: UserId) -> Self {
        Self {
            company_id,
            user_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(QuickMessageListQuery);

/// Query over contact lists; distinct from [`ContactListQuery`], which lists contacts.
#[derive(Debug, Clone)]
pub struct ContactListsQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ContactListsQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(ContactListsQuery);

#[derive(Debug, Clone)]
pub struct ContactListItemQuery {
    pub company_id: CompanyId,
    pub contact_list_id: ContactListId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ContactListItemQuery {
    pub fn new(company_id: CompanyId, contact_list_id: ContactListId) -> Self {
        Self {
            company_id,
            contact_list_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(ContactListItemQuery);

#[derive(Debug, Clone)]
pub struct FlowListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl FlowListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            pagination: None,
        }
    }
}

list_query_common!(FlowListQuery);

pub trait CompanyReader {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
}

pub trait CompanyWriter {
    /// Creates a company together with its first user in a single transaction.
    fn create_company_with_admin(
        &self,
        company: &NewCompany,
        admin: &NewUser,
    ) -> RepositoryResult<(Company, User)>;
    fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> RepositoryResult<Company>;
    fn delete_company(&self, id: CompanyId) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId, company_id: CompanyId) -> RepositoryResult<Option<User>>;
    /// Looks a user up across all companies.
    fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_credentials(&self, email: &UserEmail) -> RepositoryResult<Option<UserCredentials>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    fn list_company_users(&self, company_id: CompanyId) -> RepositoryResult<Vec<User>>;
    /// Finds the user holding `token` whose expiry is strictly after `now`.
    fn get_user_by_reset_token(
        &self,
        token: &ResetToken,
        now: chrono::NaiveDateTime,
    ) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
    /// Stores a new password hash and clears any pending reset token.
    fn set_user_password(&self, id: UserId, password_hash: &str) -> RepositoryResult<()>;
    fn set_reset_token(
        &self,
        id: UserId,
        token: &ResetToken,
        expires: chrono::NaiveDateTime,
    ) -> RepositoryResult<()>;
    fn update_profile_image(&self, id: UserId, image: &str) -> RepositoryResult<User>;
    fn update_tickets_width(&self, id: UserId, width: i32) -> RepositoryResult<User>;
}

pub trait SettingReader {
    fn get_setting(&self, company_id: CompanyId, key: &str) -> RepositoryResult<Option<Setting>>;
    fn list_settings(&self, company_id: CompanyId) -> RepositoryResult<Vec<Setting>>;
    fn list_campaign_settings(&self, company_id: CompanyId)
    -> RepositoryResult<Vec<CampaignSetting>>;
}

pub trait SettingWriter {
    fn upsert_setting(
        &self,
        company_id: CompanyId,
        key: &str,
        value: &str,
    ) -> RepositoryResult<Setting>;
    fn upsert_campaign_settings(
        &self,
        company_id: CompanyId,
        values: &[(String, String)],
    ) -> RepositoryResult<Vec<CampaignSetting>>;
}

pub trait TagReader {
    fn get_tag_by_id(&self, id: TagId, company_id: CompanyId) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<Tag>)>;
}

pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, id: TagId, updates: &UpdateTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, id: TagId) -> RepositoryResult<()>;
}

pub trait ContactReader {
    fn get_contact_by_id(
        &self,
        id: ContactId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Contact>>;
    fn get_contact_by_number(
        &self,
        number: &PhoneNumber,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    /// Inserts contacts skipping numbers already present; returns the inserted count.
    fn import_contacts(&self, new_contacts: &[NewContact]) -> RepositoryResult<usize>;
    fn update_contact(&self, id: ContactId, updates: &UpdateContact) -> RepositoryResult<Contact>;
    fn set_contact_tags(&self, id: ContactId, tag_ids: &[TagId]) -> RepositoryResult<()>;
    fn set_contact_active(&self, id: ContactId, active: bool) -> RepositoryResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
}

pub trait TicketReader {
    fn get_ticket_by_id(&self, id: TicketId, company_id: CompanyId)
    -> RepositoryResult<Option<Ticket>>;
    fn list_tickets(&self, query: TicketListQuery) -> RepositoryResult<(usize, Vec<Ticket>)>;
}

pub trait TicketWriter {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket>;
    fn update_ticket(&self, id: TicketId, updates: &UpdateTicket) -> RepositoryResult<Ticket>;
    fn delete_ticket(&self, id: TicketId) -> RepositoryResult<()>;
    /// Replaces the ticket's kanban tags with `tag_id`.
    fn move_ticket_to_lane(&self, id: TicketId, tag_id: TagId) -> RepositoryResult<Ticket>;
    /// Removes every kanban tag from the ticket.
    fn clear_ticket_lanes(&self, id: TicketId) -> RepositoryResult<Ticket>;
}

pub trait CampaignReader {
    fn get_campaign_by_id(
        &self,
        id: CampaignId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Campaign>>;
    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<(usize, Vec<Campaign>)>;
}

pub trait CampaignWriter {
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
    fn update_campaign(
        &self,
        id: CampaignId,
        updates: &UpdateCampaign,
    ) -> RepositoryResult<Campaign>;
    fn set_campaign_status(
        &self,
        id: CampaignId,
        status: CampaignStatus,
    ) -> RepositoryResult<Campaign>;
    fn delete_campaign(&self, id: CampaignId) -> RepositoryResult<()>;
}

pub trait ScheduleReader {
    fn get_schedule_by_id(
        &self,
        id: ScheduleId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Schedule>>;
    fn list_schedules(&self, query: ScheduleListQuery) -> RepositoryResult<(usize, Vec<Schedule>)>;
}

pub trait ScheduleWriter {
    fn create_schedule(&self, new_schedule: &NewSchedule) -> RepositoryResult<Schedule>;
    fn update_schedule(
        &self,
        id: ScheduleId,
        updates: &UpdateSchedule,
    ) -> RepositoryResult<Schedule>;
    fn delete_schedule(&self, id: ScheduleId) -> RepositoryResult<()>;
}

pub trait QuickMessageReader {
    fn get_quick_message_by_id(
        &self,
        id: QuickMessageId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<QuickMessage>>;
    fn list_quick_messages(
        &self,
        query: QuickMessageListQuery,
    ) -> RepositoryResult<(usize, Vec<QuickMessage>)>;
}

pub trait QuickMessageWriter {
    fn create_quick_message(&self, new_record: &NewQuickMessage) -> RepositoryResult<QuickMessage>;
    fn update_quick_message(
        &self,
        id: QuickMessageId,
        updates: &UpdateQuickMessage,
    ) -> RepositoryResult<QuickMessage>;
    fn delete_quick_message(&self, id: QuickMessageId) -> RepositoryResult<()>;
}

pub trait ContactListReader {
    fn get_contact_list_by_id(
        &self,
        id: ContactListId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<ContactList>>;
    fn list_contact_lists(
        &self,
        query: ContactListsQuery,
    ) -> RepositoryResult<(usize, Vec<ContactList>)>;
    fn get_contact_list_item_by_id(
        &self,
        id: ContactListItemId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<ContactListItem>>;
    fn list_contact_list_items(
        &self,
        query: ContactListItemQuery,
    ) -> RepositoryResult<(usize, Vec<ContactListItem>)>;
}

pub trait ContactListWriter {
    fn create_contact_list(&self, new_list: &NewContactList) -> RepositoryResult<ContactList>;
    fn rename_contact_list(
        &self,
        id: ContactListId,
        name: &ContactListName,
    ) -> RepositoryResult<ContactList>;
    /// Deletes the list with its items; campaigns pointing at it lose their audience.
    fn delete_contact_list(&self, id: ContactListId) -> RepositoryResult<()>;
    fn create_contact_list_item(
        &self,
        new_item: &NewContactListItem,
    ) -> RepositoryResult<ContactListItem>;
    /// Inserts items skipping numbers already on the list; returns the inserted count.
    fn import_contact_list_items(&self, new_items: &[NewContactListItem])
    -> RepositoryResult<usize>;
    fn update_contact_list_item(
        &self,
        id: ContactListItemId,
        updates: &UpdateContactListItem,
    ) -> RepositoryResult<ContactListItem>;
    fn delete_contact_list_item(&self, id: ContactListItemId) -> RepositoryResult<()>;
}

pub trait FlowReader {
    fn get_flow_by_id(&self, id: FlowId, company_id: CompanyId) -> RepositoryResult<Option<Flow>>;
    fn list_flows(&self, query: FlowListQuery) -> RepositoryResult<(usize, Vec<Flow>)>;
}

pub trait FlowWriter {
    fn create_flow(&self, new_flow: &NewFlow) -> RepositoryResult<Flow>;
    fn update_flow(&self, id: FlowId, updates: &UpdateFlow) -> RepositoryResult<Flow>;
    /// Replaces the stored node graph.
    fn save_flow_graph(&self, id: FlowId, graph: &serde_json::Value) -> RepositoryResult<Flow>;
    fn delete_flow(&self, id: FlowId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_offset_clamps_instead_of_wrapping() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(pagination.offset(), usize::MAX);
        assert_eq!(pagination.sql_offset(), i64::MAX);
        assert_eq!(pagination.sql_limit(), 20);

        let pagination = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(pagination.sql_offset(), 40);
    }
}
