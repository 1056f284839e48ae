//! Community, question, answer and event endpoints.

pub mod dto;
pub mod handlers;

pub use dto::{
    AnswerDto, CommunityDto, CreateCommunityRequest, CreateEventRequest, EventDto,
    SubmitAnswerRequest, UpdateCommunityRequest, UpdateQuestionRequest,
};
pub use handlers::{
    create_community, create_event, delete_community, delete_event, get_answer, get_community,
    get_event, list_communities, list_events, list_questions, submit_answer, update_community,
    update_question, CommunityHandlerState,
};
