use std::collections::BTreeMap;

use crate::model::AuthenticationRequirement;

/// Decide whether a set of credentials satisfies an operation's
/// requirements.
///
/// `requirements` is a disjunction of conjunctions: the outer groups are
/// alternatives, and every item of a group must hold for the group to
/// hold. No groups at all means the operation is open. An item holds when
/// the credential map carries the scheme name with a present value; an
/// entry explicitly mapped to `None` does not count.
///
/// Pure and total. Generated clients and servers embed this exact
/// evaluation and re-run it per request.
pub fn is_authenticated<V>(
    requirements: &[Vec<AuthenticationRequirement>],
    credentials: &BTreeMap<String, Option<V>>,
) -> bool {
    if requirements.is_empty() {
        return true;
    }
    requirements.iter().any(|group| {
        group.iter().all(|requirement| {
            credentials
                .get(&requirement.authentication_name)
                .is_some_and(|credential| credential.is_some())
        })
    })
}
