use dpi_core_contact_impl::ContactServiceImpl;
use dpi_notify_impl::NotifyServiceImpl;
use dpi_shared_impl::time::TimeServiceImpl;
use dpi_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = dpi_api_rest::RestServer<Contact>;

// Core
pub type Contact = ContactServiceImpl<Notify, Template, Time>;

// Notify
pub type Notify = NotifyServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;

// Shared
pub type Time = TimeServiceImpl;
