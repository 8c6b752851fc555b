pub mod api_response;
pub mod db_utils;
pub mod jwt_utils;
pub mod pagination;
pub mod slug_utils;
pub mod validated_wrapper;
pub mod validator_utils;
