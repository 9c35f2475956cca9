use messmate_domain::MemberId;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessId(pub u64);

impl fmt::Display for MessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the caller a report is built for. Passed explicitly wherever
/// it is needed; nothing in the workspace keeps a current-user or
/// current-mess value in ambient state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionContext {
    pub member_id: MemberId,
    pub mess_id: MessId,
}

impl SessionContext {
    pub fn new(member_id: MemberId, mess_id: MessId) -> Self {
        Self { member_id, mess_id }
    }
}
