//! Mock repository implementing every reader and writer trait for service tests.

use mockall::mock;

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
        TicketId, UserEmail, UserId,
    },
    user::{NewUser, UpdateUser, User, UserCredentials},
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CampaignListQuery, CampaignReader, CampaignWriter, CompanyListQuery, CompanyReader,
    CompanyWriter, ContactListItemQuery, ContactListQuery, ContactListReader, ContactListWriter,
    ContactListsQuery, ContactReader, ContactWriter, FlowListQuery, FlowReader, FlowWriter,
    QuickMessageListQuery,
    QuickMessageReader, QuickMessageWriter, ScheduleListQuery, ScheduleReader, ScheduleWriter,
    SettingReader, SettingWriter, TagListQuery, TagReader, TagWriter, TicketListQuery,
    TicketReader, TicketWriter, UserListQuery, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl CompanyReader for Repository {
        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
        fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
    }

    impl CompanyWriter for Repository {
        fn create_company_with_admin(
            &self,
            company: &NewCompany,
            admin: &NewUser,
        ) -> RepositoryResult<(Company, User)>;
        fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> RepositoryResult<Company>;
        fn delete_company(&self, id: CompanyId) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId, company_id: CompanyId) -> RepositoryResult<Option<User>>;
        fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_credentials(&self, email: &UserEmail) -> RepositoryResult<Option<UserCredentials>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
        fn list_company_users(&self, company_id: CompanyId) -> RepositoryResult<Vec<User>>;
        fn get_user_by_reset_token(
            &self,
            token: &ResetToken,
            now: chrono::NaiveDateTime,
        ) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
        fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
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

    impl SettingReader for Repository {
        fn get_setting(&self, company_id: CompanyId, key: &str) -> RepositoryResult<Option<Setting>>;
        fn list_settings(&self, company_id: CompanyId) -> RepositoryResult<Vec<Setting>>;
        fn list_campaign_settings(&self, company_id: CompanyId)
        -> RepositoryResult<Vec<CampaignSetting>>;
    }

    impl SettingWriter for Repository {
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

    impl TagReader for Repository {
        fn get_tag_by_id(&self, id: TagId, company_id: CompanyId) -> RepositoryResult<Option<Tag>>;
        fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<Tag>)>;
    }

    impl TagWriter for Repository {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn update_tag(&self, id: TagId, updates: &UpdateTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, id: TagId) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
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

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn import_contacts(&self, new_contacts: &[NewContact]) -> RepositoryResult<usize>;
        fn update_contact(&self, id: ContactId, updates: &UpdateContact) -> RepositoryResult<Contact>;
        fn set_contact_tags(&self, id: ContactId, tag_ids: &[TagId]) -> RepositoryResult<()>;
        fn set_contact_active(&self, id: ContactId, active: bool) -> RepositoryResult<Contact>;
        fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
    }

    impl TicketReader for Repository {
        fn get_ticket_by_id(&self, id: TicketId, company_id: CompanyId)
        -> RepositoryResult<Option<Ticket>>;
        fn list_tickets(&self, query: TicketListQuery) -> RepositoryResult<(usize, Vec<Ticket>)>;
    }

    impl TicketWriter for Repository {
        fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket>;
        fn update_ticket(&self, id: TicketId, updates: &UpdateTicket) -> RepositoryResult<Ticket>;
        fn delete_ticket(&self, id: TicketId) -> RepositoryResult<()>;
        fn move_ticket_to_lane(&self, id: TicketId, tag_id: TagId) -> RepositoryResult<Ticket>;
        fn clear_ticket_lanes(&self, id: TicketId) -> RepositoryResult<Ticket>;
    }

    impl CampaignReader for Repository {
        fn get_campaign_by_id(
            &self,
            id: CampaignId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Campaign>>;
        fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<(usize, Vec<Campaign>)>;
    }

    impl CampaignWriter for Repository {
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

    impl ScheduleReader for Repository {
        fn get_schedule_by_id(
            &self,
            id: ScheduleId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Schedule>>;
        fn list_schedules(&self, query: ScheduleListQuery) -> RepositoryResult<(usize, Vec<Schedule>)>;
    }

    impl ScheduleWriter for Repository {
        fn create_schedule(&self, new_schedule: &NewSchedule) -> RepositoryResult<Schedule>;
        fn update_schedule(
            &self,
            id: ScheduleId,
            updates: &UpdateSchedule,
        ) -> RepositoryResult<Schedule>;
        fn delete_schedule(&self, id: ScheduleId) -> RepositoryResult<()>;
    }

    impl QuickMessageReader for Repository {
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

    impl QuickMessageWriter for Repository {
        fn create_quick_message(&self, new_record: &NewQuickMessage) -> RepositoryResult<QuickMessage>;
        fn update_quick_message(
            &self,
            id: QuickMessageId,
            updates: &UpdateQuickMessage,
        ) -> RepositoryResult<QuickMessage>;
        fn delete_quick_message(&self, id: QuickMessageId) -> RepositoryResult<()>;
    }

    impl ContactListReader for Repository {
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

    impl ContactListWriter for Repository {
        fn create_contact_list(&self, new_list: &NewContactList) -> RepositoryResult<ContactList>;
        fn rename_contact_list(
            &self,
            id: ContactListId,
            name: &ContactListName,
        ) -> RepositoryResult<ContactList>;
        fn delete_contact_list(&self, id: ContactListId) -> RepositoryResult<()>;
        fn create_contact_list_item(
            &self,
            new_item: &NewContactListItem,
        ) -> RepositoryResult<ContactListItem>;
        fn import_contact_list_items(
            &self,
            new_items: &[NewContactListItem],
        ) -> RepositoryResult<usize>;
        fn update_contact_list_item(
            &self,
            id: ContactListItemId,
            updates: &UpdateContactListItem,
        ) -> RepositoryResult<ContactListItem>;
        fn delete_contact_list_item(&self, id: ContactListItemId) -> RepositoryResult<()>;
    }

    impl FlowReader for Repository {
        fn get_flow_by_id(&self, id: FlowId, company_id: CompanyId) -> RepositoryResult<Option<Flow>>;
        fn list_flows(&self, query: FlowListQuery) -> RepositoryResult<(usize, Vec<Flow>)>;
    }

    impl FlowWriter for Repository {
        fn create_flow(&self, new_flow: &NewFlow) -> RepositoryResult<Flow>;
        fn update_flow(&self, id: FlowId, updates: &UpdateFlow) -> RepositoryResult<Flow>;
        fn save_flow_graph(&self, id: FlowId, graph: &serde_json::Value) -> RepositoryResult<Flow>;
        fn delete_flow(&self, id: FlowId) -> RepositoryResult<()>;
    }
}
