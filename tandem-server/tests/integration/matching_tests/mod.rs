mod test_lone_participant_waits;
mod test_two_participants_match;
